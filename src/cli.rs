//! Command-line surface of the `jackpipe` binary.

use crate::{Error, Result};
use clap::Parser;
use jackpipe_core::{SessionConfig, TailSilence, DEFAULT_CLIENT_NAME};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jackpipe",
    version,
    about = "Play a mono WAV file into JACK and record another port into a new WAV file."
)]
pub struct Args {
    /// Mono WAV file to play
    pub input: PathBuf,

    /// Name of the port that records the external signal
    pub input_port: String,

    /// Name of the port that plays the input file
    pub output_port: String,

    /// WAV file to create with the captured frames (mono, 16-bit PCM)
    pub output: PathBuf,

    /// Number of frames to capture before writing the output file
    pub frames: usize,

    /// JACK client name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CLIENT_NAME)]
    pub client_name: String,

    /// Leave the ports unconnected instead of wiring them to the first physical ports
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_auto_connect: bool,

    /// Sleep between two checks of the capture progress, in microseconds
    #[arg(long, value_name = "MICROS", default_value_t = 10)]
    pub poll_interval_us: u64,

    /// Output frames past the end of the input file: "full" or "first-sample"
    #[arg(long, value_name = "MODE", default_value_t = TailSilence::Full)]
    pub tail_silence: TailSilence,
}

impl Args {
    /// Build the session configuration, rejecting argument combinations that
    /// would clobber the source file.
    pub fn session_config(&self) -> Result<SessionConfig> {
        if self.input == self.output {
            return Err(Error::Config(format!(
                "output file {} is the input file",
                self.output.display()
            )));
        }

        Ok(SessionConfig::new(self.frames)
            .client_name(self.client_name.clone())
            .ports(self.input_port.clone(), self.output_port.clone())
            .poll_interval(Duration::from_micros(self.poll_interval_us))
            .tail_silence(self.tail_silence)
            .auto_connect(!self.no_auto_connect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_positionals() {
        let args = Args::try_parse_from([
            "jackpipe", "in.wav", "rec", "play", "out.wav", "48000",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("in.wav"));
        assert_eq!(args.input_port, "rec");
        assert_eq!(args.output_port, "play");
        assert_eq!(args.output, PathBuf::from("out.wav"));
        assert_eq!(args.frames, 48000);
        assert_eq!(args.client_name, "jackpipe");
        assert_eq!(args.tail_silence, TailSilence::Full);

        let config = args.session_config().unwrap();
        assert_eq!(config.capture_frames, 48000);
        assert_eq!(config.ports.input, "rec");
        assert_eq!(config.ports.output, "play");
        assert_eq!(config.poll_interval, Duration::from_micros(10));
        assert!(config.auto_connect);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(Args::try_parse_from(["jackpipe", "in.wav", "rec", "play", "out.wav"]).is_err());
        assert!(Args::try_parse_from([
            "jackpipe", "in.wav", "rec", "play", "out.wav", "10", "extra"
        ])
        .is_err());
    }

    #[test]
    fn test_frames_must_be_a_count() {
        assert!(
            Args::try_parse_from(["jackpipe", "in.wav", "rec", "play", "out.wav", "-5"]).is_err()
        );
        assert!(
            Args::try_parse_from(["jackpipe", "in.wav", "rec", "play", "out.wav", "many"]).is_err()
        );
    }

    #[test]
    fn test_optional_flags() {
        let args = Args::try_parse_from([
            "jackpipe",
            "in.wav",
            "rec",
            "play",
            "out.wav",
            "0",
            "--client-name",
            "probe",
            "--no-auto-connect",
            "--poll-interval-us",
            "250",
            "--tail-silence",
            "first-sample",
        ])
        .unwrap();

        let config = args.session_config().unwrap();
        assert_eq!(config.client_name, "probe");
        assert!(!config.auto_connect);
        assert_eq!(config.poll_interval, Duration::from_micros(250));
        assert_eq!(config.tail_silence, TailSilence::FirstSample);
        assert_eq!(config.capture_frames, 0);
    }

    #[test]
    fn test_output_must_differ_from_input() {
        let args =
            Args::try_parse_from(["jackpipe", "same.wav", "rec", "play", "same.wav", "1"]).unwrap();
        assert!(matches!(args.session_config(), Err(Error::Config(_))));
    }
}
