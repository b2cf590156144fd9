use prompt_tree::app::{self, scanner::ScanError};
use std::process::ExitCode;

fn main() -> ExitCode {
    match app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<ScanError>(), Some(ScanError::Cancelled)) {
                eprintln!("Interrupted.");
                return ExitCode::from(app::EXIT_CODE_INTERRUPTED as u8);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
