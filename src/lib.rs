//! # jackpipe
//!
//! Play a mono WAV file into an audio server port while recording another
//! port into a fixed-length buffer, then write the capture as a mono 16-bit
//! PCM WAV file.
//!
//! ## Architecture
//!
//! jackpipe is an umbrella crate that coordinates:
//! - **jackpipe-core** - Sample store, real-time transfer engine, session lifecycle
//! - **jackpipe-io** - WAV decoding and encoding
//! - **jackpipe-jack** - JACK transport (feature `jack`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use clap::Parser;
//! use jackpipe::prelude::*;
//!
//! let args = Args::parse();
//! let report = jackpipe::run(
//!     &args,
//!     |config| Ok(JackTransport::connect(&config.client_name)?),
//!     &jackpipe::cancel_on_interrupt()?,
//! )?;
//! ```
//!
//! Without a server, [`OfflineTransport`](jackpipe_core::OfflineTransport)
//! drives the same session from a plain thread.
//!
//! ## Feature Flags
//!
//! - `default` - `jack`
//! - `jack` - JACK transport and the `jackpipe` binary

mod error;
pub use error::{Error, Result};

pub mod cli;
pub use cli::Args;

mod pipe;
pub use pipe::run;

mod interrupt;
pub use interrupt::cancel_on_interrupt;

pub use jackpipe_core as core;
pub use jackpipe_io as io;

#[cfg(feature = "jack")]
pub use jackpipe_jack as jack;

pub use jackpipe_core::{
    AtomicFlag, ConnectionWarning, OfflineInput, OfflineTransport, SampleBuffer, Session,
    SessionConfig, SessionReport, TailSilence,
};

/// Common imports for driving a session.
pub mod prelude {
    pub use crate::cli::Args;
    pub use crate::{run, Error, Result};
    pub use jackpipe_core::{
        AtomicFlag, OfflineInput, OfflineTransport, SampleBuffer, SessionConfig, SessionReport,
        TailSilence,
    };

    #[cfg(feature = "jack")]
    pub use jackpipe_jack::JackTransport;
}
