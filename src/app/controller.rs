//! Playback controller: the player state machine over one audio output.
//!
//! States are idle (no album chosen), paused and playing. Every operation
//! degrades to a logged no-op instead of failing.

use tracing::{debug, warn};

use crate::audio::AudioOutput;
use crate::config::AudioSettings;
use crate::library::{AlbumCard, Library, Manifest, display_name};

use super::format::{progress_percent, time_label};
use super::state::PlayerState;
use super::view::{PlayIcon, PlayerView, VolumeIcon};

pub struct Player<O, V> {
    pub(super) library: Library,
    pub(super) manifest: Manifest,
    pub(super) cards: Vec<AlbumCard>,
    pub(super) state: PlayerState,
    pub(super) output: O,
    pub(super) view: V,
    unmute_volume: f32,
}

impl<O: AudioOutput, V: PlayerView> Player<O, V> {
    pub fn new(library: Library, mut output: O, mut view: V, audio: &AudioSettings) -> Self {
        let percent = audio.initial_volume.min(100);
        let volume = f32::from(percent) / 100.0;
        output.set_volume(volume);
        view.set_volume_slider(percent);
        view.set_volume_icon(volume_icon(volume));
        view.set_play_icon(PlayIcon::Play);
        view.set_time_label(&time_label(0.0, 0.0));

        Self {
            library,
            manifest: Manifest::default(),
            cards: Vec::new(),
            state: PlayerState::new(volume),
            output,
            view,
            unmute_volume: f32::from(audio.unmute_volume.clamp(1, 100)) / 100.0,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn cards(&self) -> &[AlbumCard] {
        &self.cards
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Play the track named `name` from the chosen album.
    pub fn play_track(&mut self, name: &str, start_paused: bool) {
        let index = self.state.track_list.iter().position(|t| t == name);
        self.load_and_play(name.to_string(), index, start_paused);
    }

    /// Play entry `index` of the track list.
    pub fn play_index(&mut self, index: usize, start_paused: bool) {
        let Some(name) = self.state.track_list.get(index).cloned() else {
            debug!(index, "no track at index");
            return;
        };
        self.load_and_play(name, Some(index), start_paused);
    }

    fn load_and_play(&mut self, name: String, index: Option<usize>, start_paused: bool) {
        let Some(folder) = self.state.current_folder.as_deref() else {
            warn!(track = %name, "no album selected, ignoring play request");
            return;
        };

        let location = self.library.track_location(folder, &name);
        debug!(%location, start_paused, "loading track");
        self.output.load(location);
        self.state.current_index = index;
        self.state.loaded_track = Some(name.clone());

        if start_paused {
            self.view.set_play_icon(PlayIcon::Play);
        } else {
            self.start_playback();
        }
        self.view.set_active_track(index);
        self.view.set_now_playing(&display_name(&name));
        // Real values arrive with the next progress tick.
        self.view.set_time_label(&time_label(0.0, 0.0));
        self.view.set_seek_indicator(0.0);
    }

    fn start_playback(&mut self) {
        match self.output.play() {
            Ok(()) => self.view.set_play_icon(PlayIcon::Pause),
            Err(e) => warn!("playback did not start: {e}"),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(track) = self.state.current_track() else {
            debug!("nothing loaded, ignoring play/pause");
            return;
        };
        debug!(track, paused = self.output.is_paused(), "toggling playback");
        if self.output.is_paused() {
            self.start_playback();
        } else {
            self.output.pause();
            self.view.set_play_icon(PlayIcon::Play);
        }
    }

    /// Jump to `fraction` (0.0 to 1.0) of the track, e.g. the horizontal
    /// position of a click on the seek bar.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.view.set_seek_indicator(fraction * 100.0);
        match self.output.duration() {
            Some(total) => self.output.seek_to(total.mul_f64(fraction)),
            None => debug!("track length unknown, seek ignored"),
        }
    }

    /// Move the playback position by `delta_percent` of the track.
    pub fn seek_by(&mut self, delta_percent: f64) {
        let Some(total) = self.output.duration() else {
            return;
        };
        let current = progress_percent(
            self.output.position().as_secs_f64(),
            total.as_secs_f64(),
        );
        self.seek((current + delta_percent) / 100.0);
    }

    /// Pause, then play the next track of the album. On the last track the
    /// index stays put and playback stays paused.
    pub fn next(&mut self) {
        if self.state.loaded_track.is_none() {
            return;
        }
        self.output.pause();
        self.view.set_play_icon(PlayIcon::Play);

        let Some(i) = self.state.current_index else {
            return;
        };
        if i + 1 < self.state.track_list.len() {
            self.play_index(i + 1, false);
        }
    }

    /// Play the previous track of the album. No-op on the first track.
    pub fn previous(&mut self) {
        let Some(i) = self.state.current_index else {
            return;
        };
        if i > 0 {
            self.play_index(i - 1, false);
        }
    }

    /// Set the volume in percent (clamped to 0-100).
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        debug!(percent, "setting volume");
        self.apply_volume(f32::from(percent) / 100.0);
    }

    /// Change the volume by `delta` percent.
    pub fn volume_by(&mut self, delta: i16) {
        let current = i16::from(volume_percent(self.output.volume()));
        self.set_volume((current + delta).clamp(0, 100) as u8);
    }

    /// Swap between silence and the unmute volume.
    pub fn toggle_mute(&mut self) {
        if self.output.volume() > 0.0 {
            self.apply_volume(0.0);
        } else {
            self.apply_volume(self.unmute_volume);
        }
    }

    fn apply_volume(&mut self, volume: f32) {
        self.output.set_volume(volume);
        let volume = self.output.volume();
        self.state.volume = volume;
        self.state.muted = volume <= 0.0;
        self.view.set_volume_slider(volume_percent(volume));
        self.view.set_volume_icon(volume_icon(volume));
    }

    /// Refresh the time label, seek indicator and play icon from the output.
    /// Called on every progress tick.
    pub fn on_progress(&mut self) {
        let elapsed = self.output.position().as_secs_f64();
        let total = self
            .output
            .duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(f64::NAN);

        self.view.set_time_label(&time_label(elapsed, total));
        self.view.set_seek_indicator(progress_percent(elapsed, total));
        if self.state.loaded_track.is_some() {
            let icon = if self.output.is_paused() {
                PlayIcon::Play
            } else {
                PlayIcon::Pause
            };
            self.view.set_play_icon(icon);
        }
    }
}

fn volume_percent(volume: f32) -> u8 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn volume_icon(volume: f32) -> VolumeIcon {
    if volume > 0.0 {
        VolumeIcon::Unmuted
    } else {
        VolumeIcon::Muted
    }
}
