//! Error types for jackpipe-core.

use crate::lifecycle::SessionState;
use thiserror::Error;

/// Error type for jackpipe-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to allocate capture buffer of {frames} frames")]
    OutOfMemory { frames: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport shut the client down before capture completed ({captured}/{target} frames)")]
    AbnormalShutdown { captured: usize, target: usize },

    #[error("Session cancelled after {captured}/{target} frames")]
    Cancelled { captured: usize, target: usize },

    #[error("Invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
