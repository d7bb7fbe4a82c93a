//! Audio playback.
//!
//! This module exposes the [`AudioPlayer`] trait used by the synthesizer once
//! an audio artifact is written, and [`RodioPlayer`], which decodes the audio
//! and plays it on the default output device until it ends. Playback is best
//! effort: callers log failures and carry on.

pub mod player;

pub use player::{AudioPlayer, PlaybackError, RodioPlayer};
