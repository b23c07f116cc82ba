//! Album browser: manifest loading, album cards and album selection.

use tracing::{error, info, warn};

use crate::audio::AudioOutput;
use crate::library::{AlbumCard, Manifest};

use super::controller::Player;
use super::view::PlayerView;

impl<O: AudioOutput, V: PlayerView> Player<O, V> {
    /// Fetch the manifest. On failure the player keeps an empty manifest.
    pub fn load_manifest(&mut self) {
        self.manifest = match self.library.load_manifest() {
            Ok(m) => m,
            Err(e) => {
                error!("could not load album manifest: {e}");
                Manifest::default()
            }
        };
    }

    /// Rebuild the album cards. Albums whose info cannot be loaded are skipped.
    pub fn render_albums(&mut self) {
        let mut cards = Vec::with_capacity(self.manifest.albums.len());
        for album in &self.manifest.albums {
            match self.library.load_album_info(&album.folder) {
                Ok(album_info) => cards.push(AlbumCard {
                    folder: album.folder.clone(),
                    title: album_info.title,
                    description: album_info.description,
                    cover: self.library.cover_location(&album.folder),
                }),
                Err(e) => warn!(folder = %album.folder, "skipping album: {e}"),
            }
        }
        info!(albums = cards.len(), "rendered album cards");
        self.cards = cards;
        self.view.render_albums(&self.cards);
        self.view
            .set_active_album(self.state.current_folder.as_deref());
    }

    /// Make `folder` the chosen album and render its playlist.
    ///
    /// A folder missing from the manifest yields an empty track list.
    pub fn select_album(&mut self, folder: &str) {
        self.state.track_list = match self.manifest.album(folder) {
            Some(album) => album.tracks.clone(),
            None => {
                warn!(folder, "album not listed in manifest");
                Vec::new()
            }
        };
        self.state.current_folder = Some(folder.to_string());
        self.state.current_index = None;
        self.view.set_active_album(Some(folder));
        self.render_playlist();
        self.view.set_active_track(None);
    }

    /// Choose `folder` and start playing its first track, if any.
    pub fn open_album(&mut self, folder: &str) {
        self.select_album(folder);
        if !self.state.track_list.is_empty() {
            self.play_index(0, false);
        }
    }

    /// Open the album behind card `index`.
    pub fn activate_card(&mut self, index: usize) {
        if let Some(folder) = self.cards.get(index).map(|c| c.folder.clone()) {
            self.open_album(&folder);
        }
    }

    /// Choose the first manifest album and load its first track paused, so
    /// play is ready right after startup.
    pub fn preload_first_album(&mut self) {
        let Some(folder) = self.manifest.albums.first().map(|a| a.folder.clone()) else {
            return;
        };
        self.select_album(&folder);
        if !self.state.track_list.is_empty() {
            self.play_index(0, true);
        }
    }
}
