//! Real-time transfer kernel for playing a file into a port graph while recording another port.
//!
//! # Primary API
//!
//! - [`SampleBuffer`] / [`allocate_capture`]: fixed-capacity sample store
//! - [`TransferEngine`]: per-cycle copy between the store and port buffers
//! - [`TransferProgress`]: lock-free cursor view for the main thread
//! - [`Transport`] / [`ActiveTransport`]: seam to a concrete audio server
//! - [`Session`]: lifecycle from connection to drained capture
//! - [`OfflineTransport`]: server-less driver for dry runs and tests
//!
//! # Example
//!
//! ```ignore
//! use jackpipe_core::*;
//!
//! let playback = SampleBuffer::from_samples(samples, 44100);
//! let session = Session::new(SessionConfig::new(48000))?;
//! let drained = session.run(
//!     |_| Ok(OfflineTransport::new(44100, 256).input(OfflineInput::Loopback)),
//!     playback,
//!     &AtomicFlag::default(),
//! )?;
//! drained.finalize(|capture| write(capture))?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{SessionConfig, DEFAULT_CLIENT_NAME, DEFAULT_POLL_INTERVAL};

pub mod lockfree;
pub use lockfree::{AtomicCursor, AtomicFlag};

mod store;
pub use store::{allocate_capture, Cursor, SampleBuffer};

mod progress;
pub use progress::TransferProgress;

mod transfer;
pub use transfer::{CycleStatus, TailSilence, TransferEngine};

mod transport;
pub use transport::{ActiveTransport, ConnectionWarning, PortNames, Transport};

mod lifecycle;
pub use lifecycle::{
    wait_for_capture, DrainedSession, Session, SessionFsm, SessionReport, SessionState,
    WaitOutcome,
};

mod offline;
pub use offline::{OfflineActive, OfflineInput, OfflineTransport};
