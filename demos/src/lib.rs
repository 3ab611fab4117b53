//! Shared plumbing for the runnable demos.

use std::process::ExitCode;

use log::error;

/// Log to stderr at the level given by `RUST_LOG` (default `info`).
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Report `result` and map it to the process exit status: 0 on
/// success, otherwise [`pdfscribe::Error::exit_code`].
pub fn finish(result: pdfscribe::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

fn exit_status(err: &pdfscribe::Error) -> u8 {
    err.exit_code().clamp(1, 255) as u8
}
