//! Ctrl-C handling for the command-line run.

use jackpipe_core::AtomicFlag;
use std::io;
use std::sync::Arc;
use tracing::{info, warn};

/// Raise the returned flag on the first Ctrl-C.
///
/// The session polls the flag and deactivates the transport before returning
/// `Cancelled`, so an interrupted run leaves the server in a clean state.
/// Later interrupts are swallowed while the session winds down.
pub fn cancel_on_interrupt() -> io::Result<Arc<AtomicFlag>> {
    let cancel = Arc::new(AtomicFlag::default());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let flag = Arc::clone(&cancel);
    std::thread::Builder::new()
        .name("jackpipe-interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("interrupt received, stopping");
                        flag.set(true);
                    }
                    Err(e) => warn!("cannot listen for Ctrl-C: {}", e),
                }
            });
        })?;

    Ok(cancel)
}
