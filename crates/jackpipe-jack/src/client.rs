//! JACK client wrapper implementing the jackpipe transport seam.

use crate::error::{Error, Result};
use crate::handler::{PipeNotifications, PipeProcessor};
use jackpipe_core::{ActiveTransport, AtomicFlag, ConnectionWarning, PortNames, TransferEngine, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Type pattern for physical ports worth connecting to.
const AUDIO_TYPE_PATTERN: &str = "audio";

/// A connected, inactive JACK client.
pub struct JackTransport {
    client: jack::Client,
    ports: Option<(jack::Port<jack::AudioIn>, jack::Port<jack::AudioOut>)>,
}

impl JackTransport {
    /// Open a client. The server may be started on demand.
    pub fn connect(client_name: &str) -> Result<Self> {
        let (client, status) = jack::Client::new(client_name, jack::ClientOptions::empty())
            .map_err(|source| Error::Open {
                name: client_name.to_string(),
                source,
            })?;

        if status.contains(jack::ClientStatus::SERVER_STARTED) {
            info!("JACK server started");
        }
        if status.contains(jack::ClientStatus::NAME_NOT_UNIQUE) {
            info!("unique name '{}' assigned", client.name());
        }
        info!(
            "connected to JACK as '{}' ({} Hz, {} frames per cycle)",
            client.name(),
            client.sample_rate(),
            client.buffer_size()
        );

        Ok(Self {
            client,
            ports: None,
        })
    }
}

impl Transport for JackTransport {
    type Active = JackActive;

    fn sample_rate(&self) -> u32 {
        self.client.sample_rate() as u32
    }

    fn register_ports(&mut self, names: &PortNames) -> jackpipe_core::Result<()> {
        let input = self
            .client
            .register_port(&names.input, jack::AudioIn::default())
            .map_err(|source| Error::RegisterPort {
                port: names.input.clone(),
                source,
            })?;
        let output = self
            .client
            .register_port(&names.output, jack::AudioOut::default())
            .map_err(|source| Error::RegisterPort {
                port: names.output.clone(),
                source,
            })?;

        self.ports = Some((input, output));
        Ok(())
    }

    fn activate(self, engine: TransferEngine) -> jackpipe_core::Result<JackActive> {
        let (input, output) = self.ports.ok_or(Error::PortsNotRegistered)?;
        let input_name = input.name().map_err(Error::from)?;
        let output_name = output.name().map_err(Error::from)?;

        let shutdown = Arc::new(AtomicFlag::default());
        let xruns = Arc::new(AtomicUsize::new(0));

        let notifications = PipeNotifications::new(Arc::clone(&shutdown), Arc::clone(&xruns));
        let processor = PipeProcessor::new(engine, input, output);

        let client = self
            .client
            .activate_async(notifications, processor)
            .map_err(Error::Activate)?;

        Ok(JackActive {
            client,
            input_name,
            output_name,
            shutdown,
            xruns,
        })
    }
}

/// An active JACK client calling the engine from the process thread.
pub struct JackActive {
    client: jack::AsyncClient<PipeNotifications, PipeProcessor>,
    input_name: String,
    output_name: String,
    shutdown: Arc<AtomicFlag>,
    xruns: Arc<AtomicUsize>,
}

impl JackActive {
    /// Xruns reported by the server since activation.
    fn xruns(&self) -> usize {
        self.xruns.load(Ordering::Relaxed)
    }

    fn connect(&self, source: &str, destination: &str) -> Option<ConnectionWarning> {
        match self
            .client
            .as_client()
            .connect_ports_by_name(source, destination)
        {
            Ok(()) => {
                info!("connected {} -> {}", source, destination);
                None
            }
            Err(e) => Some(ConnectionWarning::ConnectFailed {
                source: source.to_string(),
                destination: destination.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl ActiveTransport for JackActive {
    fn connect_physical(&mut self) -> Vec<ConnectionWarning> {
        let client = self.client.as_client();
        let mut warnings = Vec::new();

        // Physical capture ports are outputs of the backend, playback ports are inputs.
        let capture = client.ports(
            None,
            Some(AUDIO_TYPE_PATTERN),
            jack::PortFlags::IS_PHYSICAL | jack::PortFlags::IS_OUTPUT,
        );
        match capture.first() {
            Some(source) => warnings.extend(self.connect(source, &self.input_name)),
            None => warnings.push(ConnectionWarning::NoPhysicalCapturePort),
        }

        let playback = client.ports(
            None,
            Some(AUDIO_TYPE_PATTERN),
            jack::PortFlags::IS_PHYSICAL | jack::PortFlags::IS_INPUT,
        );
        match playback.first() {
            Some(destination) => warnings.extend(self.connect(&self.output_name, destination)),
            None => warnings.push(ConnectionWarning::NoPhysicalPlaybackPort),
        }

        warnings
    }

    fn is_shut_down(&self) -> bool {
        self.shutdown.get()
    }

    fn deactivate(self) -> jackpipe_core::Result<TransferEngine> {
        let xruns = self.xruns();
        if xruns > 0 {
            warn!("{} xruns during session", xruns);
        }

        let (_client, _notifications, processor) =
            self.client.deactivate().map_err(Error::Deactivate)?;
        Ok(processor.into_engine())
    }
}
