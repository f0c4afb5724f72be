//! Session configuration.

use crate::transfer::TailSilence;
use crate::transport::PortNames;
use crate::{Error, Result};
use std::time::Duration;

pub const DEFAULT_CLIENT_NAME: &str = "jackpipe";

/// Sleep between two checks of the capture cursor.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(10);

const MIN_POLL_INTERVAL: Duration = Duration::from_micros(1);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for one play-and-record session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub client_name: String,
    pub ports: PortNames,
    /// Frames to record before finalizing. Zero finalizes right after activation.
    pub capture_frames: usize,
    pub poll_interval: Duration,
    pub tail_silence: TailSilence,
    /// Connect the client ports to the first physical ports after activation.
    pub auto_connect: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            ports: PortNames::default(),
            capture_frames: 0,
            poll_interval: DEFAULT_POLL_INTERVAL,
            tail_silence: TailSilence::default(),
            auto_connect: true,
        }
    }
}

impl SessionConfig {
    pub fn new(capture_frames: usize) -> Self {
        Self {
            capture_frames,
            ..Default::default()
        }
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn ports(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.ports = PortNames {
            input: input.into(),
            output: output.into(),
        };
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn tail_silence(mut self, mode: TailSilence) -> Self {
        self.tail_silence = mode;
        self
    }

    pub fn auto_connect(mut self, enabled: bool) -> Self {
        self.auto_connect = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::InvalidConfig("client name is empty".to_string()));
        }
        if self.ports.input.is_empty() || self.ports.output.is_empty() {
            return Err(Error::InvalidConfig("port names must not be empty".to_string()));
        }
        if self.ports.input == self.ports.output {
            return Err(Error::InvalidConfig(format!(
                "input and output ports share the name '{}'",
                self.ports.input
            )));
        }
        if self.poll_interval < MIN_POLL_INTERVAL || self.poll_interval > MAX_POLL_INTERVAL {
            return Err(Error::InvalidConfig(format!(
                "poll interval {:?} out of range ({:?}-{:?})",
                self.poll_interval, MIN_POLL_INTERVAL, MAX_POLL_INTERVAL
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.client_name, "jackpipe");
        assert_eq!(config.poll_interval, Duration::from_micros(10));
        assert!(config.auto_connect);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = SessionConfig::new(480)
            .client_name("probe")
            .ports("mic", "speaker")
            .tail_silence(TailSilence::FirstSample)
            .auto_connect(false);

        assert_eq!(config.capture_frames, 480);
        assert_eq!(config.client_name, "probe");
        assert_eq!(config.ports.input, "mic");
        assert_eq!(config.ports.output, "speaker");
        assert_eq!(config.tail_silence, TailSilence::FirstSample);
        assert!(!config.auto_connect);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_port_names() {
        let config = SessionConfig::new(1).ports("io", "io");
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_client_name() {
        let config = SessionConfig::new(1).client_name("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_poll_interval_out_of_range() {
        let config = SessionConfig::new(1).poll_interval(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = SessionConfig::new(1).poll_interval(Duration::from_secs(5));
        assert!(config.validate().is_err());
    }
}
