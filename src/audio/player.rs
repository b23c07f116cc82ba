use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::library::{Location, SharedSource};

use super::output::AudioOutput;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackError, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread.
///
/// Commands are applied optimistically to the shared [`PlaybackInfo`] so the
/// controller reads back what it just asked for; the audio thread corrects the
/// snapshot when a load fails or a track runs out.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(source: SharedSource, initial_volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo {
            volume: initial_volume,
            ..PlaybackInfo::default()
        }));

        let audio_handle = spawn_audio_thread(source, rx, playback_info.clone());

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx.send(cmd).map_err(|_| PlaybackError::Disconnected)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn info(&self) -> MutexGuard<'_, PlaybackInfo> {
        self.playback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn send_or_warn(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            warn!("audio command dropped: {e}");
        }
    }
}

impl AudioOutput for AudioPlayer {
    fn load(&mut self, location: Location) {
        {
            let mut info = self.info();
            info.location = Some(location.clone());
            info.elapsed = Duration::ZERO;
            info.duration = None;
            info.playing = false;
        }
        self.send_or_warn(AudioCmd::Load(location));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.info().location.is_none() {
            return Err(PlaybackError::NothingLoaded);
        }
        self.send(AudioCmd::Play)?;
        self.info().playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.info().playing = false;
        self.send_or_warn(AudioCmd::Pause);
    }

    fn is_paused(&self) -> bool {
        !self.info().playing
    }

    fn seek_to(&mut self, position: Duration) {
        self.info().elapsed = position;
        self.send_or_warn(AudioCmd::SeekTo(position));
    }

    fn position(&self) -> Duration {
        self.info().elapsed
    }

    fn duration(&self) -> Option<Duration> {
        self.info().duration
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.info().volume = volume;
        self.send_or_warn(AudioCmd::SetVolume(volume));
    }

    fn volume(&self) -> f32 {
        self.info().volume
    }
}
