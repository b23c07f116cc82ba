//! Audio-related small types and handles.
//!
//! This module defines the command set understood by the audio thread, the
//! playback snapshot it shares with the UI and the error type for playback.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::library::{LoadError, Location};

#[derive(Debug)]
pub enum AudioCmd {
    /// Fetch and decode a track, replacing the current one. Starts paused.
    Load(Location),
    /// Start or resume playback of the loaded track.
    Play,
    /// Pause playback.
    Pause,
    /// Jump to an absolute position in the loaded track.
    SeekTo(Duration),
    /// Set the output volume (0.0 to 1.0).
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Location of the loaded track, if any.
    pub location: Option<Location>,
    /// Current playback position.
    pub elapsed: Duration,
    /// Total length of the loaded track when known.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Output volume (0.0 to 1.0).
    pub volume: f32,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            location: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            volume: 1.0,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio thread is not running")]
    Disconnected,

    #[error("no audio output device: {0}")]
    NoDevice(String),

    #[error(transparent)]
    Fetch(#[from] LoadError),

    #[error("failed to decode {location}: {message}")]
    Decode { location: Location, message: String },

    #[error("no track is loaded")]
    NothingLoaded,
}
