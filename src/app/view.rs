//! The rendering surface the controller draws into.
//!
//! The controller never touches the terminal directly; it pushes display
//! state through [`PlayerView`], which the TUI implements and tests fake.

use crate::library::AlbumCard;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayIcon {
    /// Shown while paused: pressing it plays.
    #[default]
    Play,
    /// Shown while playing: pressing it pauses.
    Pause,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum VolumeIcon {
    #[default]
    Unmuted,
    Muted,
}

/// One playlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Human-readable track name.
    pub label: String,
}

pub trait PlayerView {
    fn render_albums(&mut self, cards: &[AlbumCard]);
    fn set_active_album(&mut self, folder: Option<&str>);
    fn render_playlist(&mut self, entries: &[PlaylistEntry]);
    fn set_active_track(&mut self, index: Option<usize>);
    fn set_now_playing(&mut self, title: &str);
    fn set_play_icon(&mut self, icon: PlayIcon);
    fn set_time_label(&mut self, label: &str);
    /// Seek indicator position, in percent of the bar.
    fn set_seek_indicator(&mut self, percent: f64);
    fn set_volume_slider(&mut self, percent: u8);
    fn set_volume_icon(&mut self, icon: VolumeIcon);
}
