//! Seams between the session lifecycle and a concrete audio transport.
//!
//! A transport delivers `(frame_count, input, output)` to the
//! [`TransferEngine`] once per cycle on its own real-time thread, and reports
//! its authoritative sample rate after connection.

use crate::transfer::TransferEngine;
use crate::Result;
use std::fmt;

/// Names under which the two client ports are registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortNames {
    /// Receives the external signal, feeds the capture buffer.
    pub input: String,
    /// Emits the playback buffer.
    pub output: String,
}

impl Default for PortNames {
    fn default() -> Self {
        Self {
            input: "input".to_string(),
            output: "output".to_string(),
        }
    }
}

/// Non-fatal condition. The session keeps running, possibly silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionWarning {
    /// No physical port produces audio we could record from.
    NoPhysicalCapturePort,
    /// No physical port accepts the audio we play.
    NoPhysicalPlaybackPort,
    ConnectFailed {
        source: String,
        destination: String,
        reason: String,
    },
    /// Source file and transport disagree; no resampling is applied.
    SampleRateMismatch { transport: u32, file: u32 },
}

impl fmt::Display for ConnectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionWarning::NoPhysicalCapturePort => f.write_str("no physical capture ports"),
            ConnectionWarning::NoPhysicalPlaybackPort => {
                f.write_str("no physical playback ports")
            }
            ConnectionWarning::ConnectFailed {
                source,
                destination,
                reason,
            } => write!(f, "cannot connect {} -> {}: {}", source, destination, reason),
            ConnectionWarning::SampleRateMismatch { transport, file } => write!(
                f,
                "sample rate mismatch: transport {} Hz, file {} Hz",
                transport, file
            ),
        }
    }
}

/// A connected, not yet active transport client.
pub trait Transport: Sized {
    type Active: ActiveTransport;

    /// Authoritative sample rate of the running server.
    fn sample_rate(&self) -> u32;

    /// Register one mono input and one mono output port.
    fn register_ports(&mut self, names: &PortNames) -> Result<()>;

    /// Hand the engine to the transport and start calling it every cycle.
    fn activate(self, engine: TransferEngine) -> Result<Self::Active>;
}

/// A transport that is calling the engine from its own thread.
pub trait ActiveTransport {
    /// Wire the client ports to the first physical ports of the graph.
    ///
    /// Every failure is returned as a warning; none are fatal.
    fn connect_physical(&mut self) -> Vec<ConnectionWarning>;

    /// Set once the transport has dropped the client on its own.
    fn is_shut_down(&self) -> bool;

    /// Stop the callbacks and take the engine back.
    fn deactivate(self) -> Result<TransferEngine>;
}
