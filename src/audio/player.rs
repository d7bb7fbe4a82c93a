use std::io::Cursor;

use bytes::Bytes;
use log::debug;
use rodio::{Decoder, OutputStream, Sink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("the audio data cannot be decoded: {0}")]
    Decode(String),
    #[error("no playback device available: {0}")]
    Device(String),
}

/// Plays encoded audio
pub trait AudioPlayer: Send + Sync {
    /// Play `audio`, returning once playback has finished
    fn play(&self, audio: Bytes) -> Result<(), PlaybackError>;
}

/// Player for the default output device
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&self, audio: Bytes) -> Result<(), PlaybackError> {
        let decoder =
            Decoder::new(Cursor::new(audio)).map_err(|err| PlaybackError::Decode(err.to_string()))?;

        let (_stream, handle) =
            OutputStream::try_default().map_err(|err| PlaybackError::Device(err.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|err| PlaybackError::Device(err.to_string()))?;

        debug!("Playing audio");
        sink.append(decoder);
        sink.sleep_until_end();
        Ok(())
    }
}
