use env_logger::Builder;
use log::LevelFilter;
use std::env;

/// Sets up `env_logger` on stderr. `RUST_LOG` takes precedence over the CLI flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    builder.format_timestamp(None).format_target(false);

    // Ignore a second initialisation, e.g. when tests call this repeatedly.
    let _ = builder.try_init();
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
