/// Player state owned by the single controller instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Folder of the chosen album. `None` only until the first album is chosen.
    pub current_folder: Option<String>,
    /// Manifest filenames of the chosen album, index-aligned with the playlist.
    pub track_list: Vec<String>,
    /// Index into `track_list` of the loaded track. `None` when the loaded
    /// track is not part of the list.
    pub current_index: Option<usize>,
    /// Manifest filename of the track loaded into the output, if any.
    pub loaded_track: Option<String>,
    /// Output volume (0.0 to 1.0).
    pub volume: f32,
    pub muted: bool,
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            current_folder: None,
            track_list: Vec::new(),
            current_index: None,
            loaded_track: None,
            volume,
            muted: volume <= 0.0,
        }
    }

    /// Filename of the loaded track, if any.
    pub fn current_track(&self) -> Option<&str> {
        self.loaded_track.as_deref()
    }
}
