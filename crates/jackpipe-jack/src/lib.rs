//! JACK transport for jackpipe.
//!
//! [`JackTransport`] opens a client and registers the two mono ports;
//! activating it moves the [`TransferEngine`](jackpipe_core::TransferEngine)
//! into a `jack::ProcessHandler`. Deactivation hands the engine back.
//!
//! ```ignore
//! let drained = session.run(
//!     |config| Ok(JackTransport::connect(&config.client_name)?),
//!     playback,
//!     &cancel,
//! )?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod client;
pub use client::{JackActive, JackTransport};

mod handler;
pub use handler::{PipeNotifications, PipeProcessor};
