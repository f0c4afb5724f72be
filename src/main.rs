use clap::Parser;
use jackpipe::jack::JackTransport;
use jackpipe::Args;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            // Printing only fails if stderr is gone; the exit code still reports it.
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let cancel = match jackpipe::cancel_on_interrupt() {
        Ok(cancel) => cancel,
        Err(e) => {
            error!("cannot install Ctrl-C handler: {}", e);
            return ExitCode::from(1);
        }
    };

    match jackpipe::run(
        &args,
        |config| Ok(JackTransport::connect(&config.client_name)?),
        &cancel,
    ) {
        Ok(report) => {
            info!(
                "played {}/{} frames, captured {} frames at {} Hz",
                report.played,
                report.playback_len,
                report.captured,
                report.transport_sample_rate
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(1)
        }
    }
}
