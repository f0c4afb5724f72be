//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Could not open a client on the server.
    #[error("Unable to connect to JACK server as '{name}': {source}")]
    Open {
        name: String,
        #[source]
        source: jack::Error,
    },

    /// Port registration failed.
    #[error("Cannot register port '{port}': {source}")]
    RegisterPort {
        port: String,
        #[source]
        source: jack::Error,
    },

    /// Activation requested before both ports exist.
    #[error("Ports must be registered before activation")]
    PortsNotRegistered,

    /// Activation failed.
    #[error("Cannot activate client: {0}")]
    Activate(#[source] jack::Error),

    /// Deactivation failed; the engine is lost with the client.
    #[error("Cannot deactivate client: {0}")]
    Deactivate(#[source] jack::Error),

    /// Any other JACK error.
    #[error("JACK error: {0}")]
    Jack(#[from] jack::Error),
}

impl From<Error> for jackpipe_core::Error {
    fn from(e: Error) -> Self {
        jackpipe_core::Error::Transport(e.to_string())
    }
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
