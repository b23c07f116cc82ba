use crate::audio::AudioOutput;
use crate::library::display_name;

use super::controller::Player;
use super::view::{PlayerView, PlaylistEntry};

/// Playlist rows for `tracks`, in order.
pub fn playlist_entries(tracks: &[String]) -> Vec<PlaylistEntry> {
    tracks
        .iter()
        .map(|t| PlaylistEntry {
            label: display_name(t),
        })
        .collect()
}

impl<O: AudioOutput, V: PlayerView> Player<O, V> {
    /// Replace the rendered playlist with the current track list.
    pub fn render_playlist(&mut self) {
        let entries = playlist_entries(&self.state.track_list);
        self.view.render_playlist(&entries);
    }

    /// Play the track behind playlist row `index`.
    ///
    /// Rows map to tracks by position, never by their label.
    pub fn activate_entry(&mut self, index: usize) {
        self.play_index(index, false);
    }
}
