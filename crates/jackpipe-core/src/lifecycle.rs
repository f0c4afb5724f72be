//! Session lifecycle: connect, register, activate, wait for capture, drain, finalize.

use crate::config::SessionConfig;
use crate::lockfree::AtomicFlag;
use crate::progress::TransferProgress;
use crate::store::{allocate_capture, SampleBuffer};
use crate::transfer::TransferEngine;
use crate::transport::{ActiveTransport, ConnectionWarning, Transport};
use crate::{Error, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unconnected,
    Connected,
    PortsRegistered,
    Active,
    Draining,
    Finalizing,
    Terminated,
}

/// Guards the legal order of session states.
#[derive(Debug, Default)]
pub struct SessionFsm {
    state: SessionState,
}

impl SessionFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transition(&mut self, to: SessionState) -> Result<()> {
        use SessionState::*;

        let legal = matches!(
            (self.state, to),
            (Unconnected, Connected)
                | (Connected, PortsRegistered)
                | (PortsRegistered, Active)
                | (Active, Draining)
                | (Active, Terminated)
                | (Draining, Finalizing)
                | (Finalizing, Terminated)
        );

        if !legal {
            return Err(Error::InvalidTransition {
                from: self.state,
                to,
            });
        }

        debug!("session {:?} -> {:?}", self.state, to);
        self.state = to;
        Ok(())
    }
}

/// Why the poll loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    CaptureComplete,
    Shutdown,
    Cancelled,
}

/// Block the calling thread until the capture cursor reaches its target.
///
/// A full capture wins over a shutdown seen in the same poll.
///
/// Only atomics are read; the real-time side is never waited on.
pub fn wait_for_capture<A: ActiveTransport>(
    progress: &TransferProgress,
    active: &A,
    cancel: &AtomicFlag,
    poll_interval: Duration,
) -> WaitOutcome {
    loop {
        if progress.is_capture_complete() {
            return WaitOutcome::CaptureComplete;
        }
        if active.is_shut_down() {
            // The last cycle may have filled the capture after the check above.
            if progress.is_capture_complete() {
                return WaitOutcome::CaptureComplete;
            }
            return WaitOutcome::Shutdown;
        }
        if cancel.get() {
            return WaitOutcome::Cancelled;
        }
        std::thread::sleep(poll_interval);
    }
}

/// Summary of a finished or drained session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub played: usize,
    pub playback_len: usize,
    pub captured: usize,
    pub capture_target: usize,
    pub file_sample_rate: u32,
    pub transport_sample_rate: u32,
    pub warnings: Vec<ConnectionWarning>,
}

/// Drives one transport from connection to drained capture.
pub struct Session {
    config: SessionConfig,
    fsm: SessionFsm,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fsm: SessionFsm::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.fsm.state()
    }

    /// Run the session until the capture target is met.
    ///
    /// `connect` opens the transport; its sample rate becomes the rate of the
    /// capture buffer. Returns once the transport is deactivated and the
    /// engine is back on this thread.
    pub fn run<T, F>(
        mut self,
        connect: F,
        playback: SampleBuffer,
        cancel: &AtomicFlag,
    ) -> Result<DrainedSession>
    where
        T: Transport,
        F: FnOnce(&SessionConfig) -> Result<T>,
    {
        let file_rate = playback.sample_rate();
        let capture = allocate_capture(self.config.capture_frames, file_rate)?;
        let mut warnings = Vec::new();

        let mut transport = connect(&self.config)?;
        self.fsm.transition(SessionState::Connected)?;

        let transport_rate = transport.sample_rate();
        if transport_rate != file_rate {
            let warning = ConnectionWarning::SampleRateMismatch {
                transport: transport_rate,
                file: file_rate,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
        let capture = capture.with_sample_rate(transport_rate);

        transport.register_ports(&self.config.ports)?;
        self.fsm.transition(SessionState::PortsRegistered)?;

        let engine = TransferEngine::new(playback, capture, self.config.tail_silence);
        let progress = engine.progress();
        let mut active = transport.activate(engine)?;
        self.fsm.transition(SessionState::Active)?;
        info!(
            "activated: playing {} frames, capturing {} frames at {} Hz",
            progress.playback_len(),
            progress.capture_target(),
            transport_rate
        );

        if self.config.auto_connect {
            for warning in active.connect_physical() {
                warn!("{}", warning);
                warnings.push(warning);
            }
        }

        match wait_for_capture(&*progress, &active, cancel, self.config.poll_interval) {
            WaitOutcome::CaptureComplete => {}
            WaitOutcome::Shutdown => {
                self.fsm.transition(SessionState::Terminated)?;
                return Err(Error::AbnormalShutdown {
                    captured: progress.captured(),
                    target: progress.capture_target(),
                });
            }
            WaitOutcome::Cancelled => {
                if let Err(e) = active.deactivate() {
                    warn!("deactivate after cancel failed: {}", e);
                }
                self.fsm.transition(SessionState::Terminated)?;
                return Err(Error::Cancelled {
                    captured: progress.captured(),
                    target: progress.capture_target(),
                });
            }
        }

        self.fsm.transition(SessionState::Draining)?;
        let engine = active.deactivate()?;

        let report = SessionReport {
            played: engine.playback_cursor().position(),
            playback_len: engine.playback().len(),
            captured: engine.capture_cursor().position(),
            capture_target: engine.capture().len(),
            file_sample_rate: file_rate,
            transport_sample_rate: transport_rate,
            warnings,
        };

        Ok(DrainedSession {
            fsm: self.fsm,
            capture: engine.into_capture(),
            report,
        })
    }
}

/// A session whose capture target was reached. Finalizing consumes it.
pub struct DrainedSession {
    fsm: SessionFsm,
    capture: SampleBuffer,
    report: SessionReport,
}

impl DrainedSession {
    pub fn state(&self) -> SessionState {
        self.fsm.state()
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    pub fn capture(&self) -> &SampleBuffer {
        &self.capture
    }

    /// Hand the capture buffer to `write` exactly once.
    pub fn finalize<F, E>(mut self, write: F) -> core::result::Result<SessionReport, E>
    where
        F: FnOnce(&SampleBuffer) -> core::result::Result<(), E>,
        E: From<Error>,
    {
        self.fsm.transition(SessionState::Finalizing)?;
        write(&self.capture)?;
        self.fsm.transition(SessionState::Terminated)?;
        Ok(self.report)
    }
}
