//! Deterministic transport that drives the engine from a plain thread.
//!
//! No audio server is involved: each cycle feeds a fixed-size block from an
//! [`OfflineInput`] into the engine. Useful for dry runs and for exercising the
//! session lifecycle without JACK.

use crate::lockfree::{AtomicCursor, AtomicFlag};
use crate::transfer::TransferEngine;
use crate::transport::{ActiveTransport, ConnectionWarning, PortNames, Transport};
use crate::{Error, Result};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

/// What arrives on the input port each cycle.
#[derive(Debug, Clone, Default)]
pub enum OfflineInput {
    #[default]
    Silence,
    /// Played once, then silence.
    Signal(Vec<f32>),
    /// The previous cycle's output, like a cable from output to input.
    Loopback,
}

pub struct OfflineTransport {
    sample_rate: u32,
    block_size: usize,
    input: OfflineInput,
    physical_ports: bool,
    shutdown_after: Option<usize>,
    cycle_interval: Duration,
    ports: Option<PortNames>,
}

impl OfflineTransport {
    pub fn new(sample_rate: u32, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size,
            input: OfflineInput::default(),
            physical_ports: true,
            shutdown_after: None,
            cycle_interval: Duration::ZERO,
            ports: None,
        }
    }

    pub fn input(mut self, input: OfflineInput) -> Self {
        self.input = input;
        self
    }

    /// Whether auto-connect finds physical ports. Default: true
    pub fn physical_ports(mut self, available: bool) -> Self {
        self.physical_ports = available;
        self
    }

    /// Drop the client after `cycles` cycles, as a dying server would.
    pub fn shutdown_after(mut self, cycles: usize) -> Self {
        self.shutdown_after = Some(cycles);
        self
    }

    /// Pause between cycles. Zero yields instead of sleeping.
    pub fn cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = interval;
        self
    }
}

impl Transport for OfflineTransport {
    type Active = OfflineActive;

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn register_ports(&mut self, names: &PortNames) -> Result<()> {
        if self.ports.is_some() {
            return Err(Error::Transport("ports already registered".to_string()));
        }
        self.ports = Some(names.clone());
        Ok(())
    }

    fn activate(self, engine: TransferEngine) -> Result<OfflineActive> {
        let ports = self
            .ports
            .ok_or_else(|| Error::Transport("cannot activate before registering ports".to_string()))?;
        if self.block_size == 0 {
            return Err(Error::Transport("block size must be non-zero".to_string()));
        }

        let stop = Arc::new(AtomicFlag::default());
        let shutdown = Arc::new(AtomicFlag::default());
        let cycles = Arc::new(AtomicCursor::default());

        let driver = Driver {
            engine,
            block_size: self.block_size,
            input: self.input,
            shutdown_after: self.shutdown_after,
            cycle_interval: self.cycle_interval,
            stop: Arc::clone(&stop),
            shutdown: Arc::clone(&shutdown),
            cycles: Arc::clone(&cycles),
        };

        let handle = std::thread::Builder::new()
            .name("jackpipe-offline".to_string())
            .spawn(move || driver.run())
            .map_err(|e| Error::Transport(format!("failed to spawn offline driver: {}", e)))?;

        Ok(OfflineActive {
            ports,
            physical_ports: self.physical_ports,
            stop,
            shutdown,
            cycles,
            handle: Some(handle),
        })
    }
}

struct Driver {
    engine: TransferEngine,
    block_size: usize,
    input: OfflineInput,
    shutdown_after: Option<usize>,
    cycle_interval: Duration,
    stop: Arc<AtomicFlag>,
    shutdown: Arc<AtomicFlag>,
    cycles: Arc<AtomicCursor>,
}

impl Driver {
    fn run(mut self) -> TransferEngine {
        let mut input_block = vec![0.0f32; self.block_size];
        let mut output_block = vec![0.0f32; self.block_size];
        let mut signal_pos = 0;
        let mut cycles = 0;

        while !self.stop.get() {
            match &self.input {
                OfflineInput::Silence => input_block.fill(0.0),
                OfflineInput::Signal(signal) => {
                    let n = self.block_size.min(signal.len() - signal_pos);
                    input_block[..n].copy_from_slice(&signal[signal_pos..signal_pos + n]);
                    input_block[n..].fill(0.0);
                    signal_pos += n;
                }
                OfflineInput::Loopback => input_block.copy_from_slice(&output_block),
            }

            self.engine
                .on_cycle(self.block_size, &input_block, &mut output_block);
            cycles += 1;
            self.cycles.publish(cycles);

            if self.shutdown_after == Some(cycles) {
                self.shutdown.set(true);
                break;
            }

            if self.cycle_interval.is_zero() {
                std::thread::yield_now();
            } else {
                std::thread::sleep(self.cycle_interval);
            }
        }

        self.engine
    }
}

/// Running offline driver.
pub struct OfflineActive {
    ports: PortNames,
    physical_ports: bool,
    stop: Arc<AtomicFlag>,
    shutdown: Arc<AtomicFlag>,
    cycles: Arc<AtomicCursor>,
    handle: Option<JoinHandle<TransferEngine>>,
}

impl OfflineActive {
    /// Cycles processed so far.
    pub fn cycles(&self) -> usize {
        self.cycles.get()
    }
}

impl ActiveTransport for OfflineActive {
    fn connect_physical(&mut self) -> Vec<ConnectionWarning> {
        if !self.physical_ports {
            return vec![
                ConnectionWarning::NoPhysicalCapturePort,
                ConnectionWarning::NoPhysicalPlaybackPort,
            ];
        }

        debug!(
            "offline: system:capture_1 -> {}, {} -> system:playback_1",
            self.ports.input, self.ports.output
        );
        Vec::new()
    }

    fn is_shut_down(&self) -> bool {
        self.shutdown.get()
    }

    fn deactivate(mut self) -> Result<TransferEngine> {
        self.stop.set(true);
        let handle = self
            .handle
            .take()
            .ok_or_else(|| Error::Transport("offline driver already joined".to_string()))?;
        let engine = handle
            .join()
            .map_err(|_| Error::Transport("offline driver thread panicked".to_string()))?;

        debug!("offline: stopped after {} cycles", self.cycles());
        Ok(engine)
    }
}

impl Drop for OfflineActive {
    fn drop(&mut self) {
        self.stop.set(true);
    }
}
