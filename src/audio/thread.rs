use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::library::{Location, SharedSource};

use super::sink::{TrackBytes, create_sink_at, probe_duration};
use super::types::{AudioCmd, PlaybackError, PlaybackHandle};

/// The loaded track and the sink currently playing it.
struct Loaded {
    location: Location,
    bytes: TrackBytes,
    sink: Sink,
    /// Added to `sink.get_pos()` when the sink was rebuilt at an offset.
    offset: Duration,
}

/// Audio thread state, owned entirely by the thread.
struct Engine {
    source: SharedSource,
    playback_info: PlaybackHandle,
    stream: Option<OutputStream>,
    loaded: Option<Loaded>,
    volume: f32,
    playing: bool,
}

pub(super) fn spawn_audio_thread(
    source: SharedSource,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device, playback disabled: {e}");
                None
            }
        };

        let volume = playback_info.lock().map(|i| i.volume).unwrap_or(1.0);
        let mut engine = Engine {
            source,
            playback_info,
            stream,
            loaded: None,
            volume,
            playing: false,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    engine.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            engine.publish_progress();
        }
        debug!("audio thread exiting");
    })
}

impl Engine {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load(location) => {
                if let Err(e) = self.load(location) {
                    error!("failed to load track: {e}");
                    self.set_stopped();
                }
            }
            AudioCmd::Play => {
                if let Err(e) = self.play() {
                    warn!("playback did not start: {e}");
                    self.set_stopped();
                }
            }
            AudioCmd::Pause => {
                if let Some(l) = &self.loaded {
                    l.sink.pause();
                }
                self.playing = false;
            }
            AudioCmd::SeekTo(position) => self.seek(position),
            AudioCmd::SetVolume(volume) => {
                self.volume = volume;
                if let Some(l) = &self.loaded {
                    l.sink.set_volume(volume);
                }
            }
            AudioCmd::Quit { .. } => {}
        }
    }

    fn stream(&self) -> Result<&OutputStream, PlaybackError> {
        self.stream
            .as_ref()
            .ok_or_else(|| PlaybackError::NoDevice("output stream unavailable".to_string()))
    }

    fn load(&mut self, location: Location) -> Result<(), PlaybackError> {
        if let Some(old) = self.loaded.take() {
            old.sink.stop();
        }
        self.playing = false;

        let bytes: TrackBytes = self.source.fetch(&location)?.into();
        let (sink, decoded_total) =
            create_sink_at(self.stream()?, &location, &bytes, Duration::ZERO, self.volume)?;
        let duration = decoded_total.or_else(|| probe_duration(&bytes));

        info!(%location, ?duration, "track loaded");
        if let Ok(mut info) = self.playback_info.lock() {
            // A newer load may already have been requested; only report on our own.
            if info.location.as_ref() == Some(&location) {
                info.duration = duration;
            }
        }

        self.loaded = Some(Loaded {
            location,
            bytes,
            sink,
            offset: Duration::ZERO,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let ended = match &self.loaded {
            Some(l) => l.sink.empty(),
            None => return Err(PlaybackError::NothingLoaded),
        };
        if ended {
            // Like a media element, playing an ended track restarts it.
            self.rebuild_at(Duration::ZERO)?;
        }
        if let Some(l) = &self.loaded {
            l.sink.play();
        }
        self.playing = true;
        Ok(())
    }

    fn seek(&mut self, position: Duration) {
        let Some(l) = &mut self.loaded else {
            return;
        };
        if !l.sink.empty() {
            match l.sink.try_seek(position) {
                Ok(()) => {
                    l.offset = Duration::ZERO;
                    return;
                }
                Err(e) => debug!("in-place seek failed, rebuilding sink: {e}"),
            }
        }
        if let Err(e) = self.rebuild_at(position) {
            warn!("seek failed: {e}");
        }
    }

    /// Replace the sink with a fresh one starting at `start_at`, keeping the
    /// paused/playing state.
    fn rebuild_at(&mut self, start_at: Duration) -> Result<(), PlaybackError> {
        let Some(old) = self.loaded.take() else {
            return Err(PlaybackError::NothingLoaded);
        };
        old.sink.stop();

        let (sink, _) = create_sink_at(
            self.stream()?,
            &old.location,
            &old.bytes,
            start_at,
            self.volume,
        )?;
        if self.playing {
            sink.play();
        }
        self.loaded = Some(Loaded {
            sink,
            offset: start_at,
            ..old
        });
        Ok(())
    }

    fn set_stopped(&mut self) {
        self.playing = false;
        if let Ok(mut info) = self.playback_info.lock() {
            info.playing = false;
        }
    }

    /// Push the current position into the shared snapshot; detect end of track.
    fn publish_progress(&mut self) {
        let Some(l) = &self.loaded else {
            return;
        };
        let ended = self.playing && l.sink.empty();
        let elapsed = l.offset + l.sink.get_pos();

        let Ok(mut info) = self.playback_info.lock() else {
            return;
        };
        if info.location.as_ref() != Some(&l.location) {
            return;
        }
        if ended {
            debug!(location = %l.location, "track ended");
            self.playing = false;
            info.playing = false;
            if let Some(total) = info.duration {
                info.elapsed = total;
            }
        } else if self.playing {
            info.elapsed = elapsed;
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(l) = &self.loaded {
            if self.playing {
                fade_out_sink(&l.sink, self.volume, fade_out_ms);
            }
            l.sink.stop();
        }
        self.set_stopped();
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
