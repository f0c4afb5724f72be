//! One complete play-and-record run: load, transfer, write.

use crate::cli::Args;
use crate::Result;
use jackpipe_core::{AtomicFlag, Session, SessionConfig, SessionReport, Transport};
use tracing::info;

/// Play `args.input` through the transport opened by `connect` and write the
/// captured frames to `args.output`.
///
/// Nothing is written unless the capture target was reached.
pub fn run<T, F>(args: &Args, connect: F, cancel: &AtomicFlag) -> Result<SessionReport>
where
    T: Transport,
    F: FnOnce(&SessionConfig) -> jackpipe_core::Result<T>,
{
    let session = Session::new(args.session_config()?)?;
    let playback = jackpipe_io::load_playback(&args.input)?;

    let drained = session.run(connect, playback, cancel)?;

    let report = drained.finalize(|capture| -> Result<()> {
        jackpipe_io::write_output(&args.output, capture)?;
        Ok(())
    })?;

    info!(
        "wrote {} frames to {}",
        report.captured,
        args.output.display()
    );
    Ok(report)
}
