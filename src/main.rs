use clap::Parser;
use echo_client::{Cli, EchoError, commands};
use std::process::ExitCode;

/// Environment variable holding the `env_logger` filter.
const LOG_ENV: &str = "ECHO_LOG";

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match commands::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        // The view already shows the failure; only the exit status remains.
        Err(EchoError::RequestFailed(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
