//! JACK callbacks.

use jackpipe_core::{AtomicFlag, TransferEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Implements the `jack::ProcessHandler` trait.
pub struct PipeProcessor {
    /// The transfer engine, owned by the process thread while active.
    engine: TransferEngine,
    input: jack::Port<jack::AudioIn>,
    output: jack::Port<jack::AudioOut>,
}

impl PipeProcessor {
    pub fn new(
        engine: TransferEngine,
        input: jack::Port<jack::AudioIn>,
        output: jack::Port<jack::AudioOut>,
    ) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn into_engine(self) -> TransferEngine {
        self.engine
    }
}

impl jack::ProcessHandler for PipeProcessor {
    fn process(&mut self, _: &jack::Client, ps: &jack::ProcessScope) -> jack::Control {
        let frames = ps.n_frames() as usize;
        let input = self.input.as_slice(ps);
        let output = self.output.as_mut_slice(ps);

        // Completion is observed by the session poll loop, not by stopping the client.
        let _ = self.engine.on_cycle(frames, input, output);
        jack::Control::Continue
    }
}

/// Implements the `jack::NotificationHandler` trait.
pub struct PipeNotifications {
    shutdown: Arc<AtomicFlag>,
    xruns: Arc<AtomicUsize>,
}

impl PipeNotifications {
    pub fn new(shutdown: Arc<AtomicFlag>, xruns: Arc<AtomicUsize>) -> Self {
        Self { shutdown, xruns }
    }
}

impl jack::NotificationHandler for PipeNotifications {
    unsafe fn shutdown(&mut self, _status: jack::ClientStatus, _reason: &str) {
        // Only an atomic store: no JACK calls are allowed here.
        self.shutdown.set(true);
    }

    fn xrun(&mut self, _: &jack::Client) -> jack::Control {
        self.xruns.fetch_add(1, Ordering::Relaxed);
        jack::Control::Continue
    }
}
