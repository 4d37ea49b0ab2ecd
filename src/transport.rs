use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open media file: {0}")]
    Open(#[from] io::Error),
    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("audio output unavailable: {0}")]
    Device(#[from] rodio::StreamError),
}

/// Downstream receiver of committed seek positions.
///
/// Progress values share the unit of the track's `max`. For local files that
/// is milliseconds.
pub trait SeekTransport {
    fn seek(&mut self, value: f64) -> Result<(), TransportError>;

    /// Current playback position, if the transport keeps a clock.
    fn position(&self) -> Option<f64> {
        None
    }

    /// Track length, if known.
    fn duration(&self) -> Option<f64> {
        None
    }

    fn toggle_pause(&mut self) {}

    fn is_paused(&self) -> bool {
        false
    }

    fn label(&self) -> &str;
}

/// Placeholder for the server socket: records seek events in the log only.
pub struct LogTransport {
    server: String,
}

impl LogTransport {
    pub fn new(server: impl Into<String>) -> Self {
        LogTransport {
            server: server.into(),
        }
    }
}

impl SeekTransport for LogTransport {
    fn seek(&mut self, value: f64) -> Result<(), TransportError> {
        // TODO: emit over the server socket once the dashboard protocol exists.
        log::info!("seek event for server {}: {value:.0}", self.server);
        Ok(())
    }

    fn label(&self) -> &str {
        "remote (not connected)"
    }
}
