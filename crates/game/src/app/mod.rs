use std::process::ExitCode;

mod bootstrap;
mod loop_runner;
mod session;

pub(crate) fn run() -> ExitCode {
    match bootstrap::build_app() {
        Ok(wiring) => loop_runner::run(wiring),
        Err(error) => {
            tracing::error!(error = %error, "bootstrap_failed");
            ExitCode::FAILURE
        }
    }
}
