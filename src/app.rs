// Declare modules
pub mod cache;
pub mod cli;
pub mod config;
pub mod extractors;
pub mod formatter;
pub mod logging;
pub mod models;
pub mod progress;
pub mod scanner;
pub mod session;
pub mod worker;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::{RuntimeConfig, ScanResult};
use self::progress::ScanProgress;
use self::scanner::ScanError;
use self::session::{ScanSession, ScanStart, SessionEvent};

/// Exit code used when Ctrl+C stops a scan (128 + SIGINT).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    logging::init_logging(args.verbose, args.quiet);

    // 2. Identify Project Root & Name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let config = resolve_config(&args, project_name)?;

    let roots = if args.paths.is_empty() {
        vec![current_dir.clone()]
    } else {
        args.paths.clone()
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl+C handler")?;

    // 4. Scan each folder in turn; repeats come from the cache
    let mut session = ScanSession::new();
    for root in &roots {
        if !root.is_dir() {
            bail!("Not a directory: {}", root.display());
        }

        let result = scan_folder(&mut session, root, &config, &interrupted)?;

        // 5. Generate Output
        let root_name = OutputGenerator::root_name(root);
        let final_output = if config.tree_only_output {
            OutputGenerator::format_tree_only(&root_name, &result.tree)
        } else {
            OutputGenerator::format_full_output(&root_name, &result.tree, &result.content)
        };

        // 6. Print to Stdout
        println!("{}", final_output);
    }

    Ok(())
}

fn scan_folder(
    session: &mut ScanSession,
    root: &Path,
    config: &RuntimeConfig,
    interrupted: &AtomicBool,
) -> Result<ScanResult> {
    if let ScanStart::Cached(result) = session.start_scan(root, config.scan)? {
        return Ok(result);
    }

    let progress = ScanProgress::new(config.show_progress);
    progress.start(root.display().to_string(), 0);

    loop {
        if interrupted.load(Ordering::SeqCst) {
            session.stop();
            progress.abandon();
            return Err(ScanError::Cancelled.into());
        }

        for event in session.wait(POLL_INTERVAL) {
            match event {
                SessionEvent::Started { total } => progress.start(root.display().to_string(), total),
                SessionEvent::Progress(count) => progress.update(count),
                SessionEvent::Completed(result) => {
                    progress.finish();
                    return Ok(result);
                }
                SessionEvent::Failed(err) => {
                    progress.abandon();
                    return Err(err).with_context(|| format!("Scan of {} failed", root.display()));
                }
            }
        }
    }
}
