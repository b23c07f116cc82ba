//! Terminal implementation of [`PlayerView`].
//!
//! `TuiView` stores what the controller pushed plus the cursor/focus state
//! only the terminal needs, and maps mouse clicks back onto widgets using the
//! regions recorded by the last draw.

use ratatui::layout::Rect;

use crate::app::{PlayIcon, PlayerView, PlaylistEntry, VolumeIcon};
use crate::library::AlbumCard;

use super::visible_window;

/// Which list receives cursor keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Albums,
    Playlist,
}

/// Screen areas recorded by the last draw, used for mouse hit-testing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Regions {
    pub albums: Option<Rect>,
    pub playlist: Rect,
    pub seek_bar: Rect,
    /// Rows per album card.
    pub album_item_height: u16,
}

/// What a mouse click landed on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Hit {
    Album(usize),
    Track(usize),
    /// Fraction of the seek bar width, left edge = 0.0.
    Seek(f64),
}

pub struct TuiView {
    pub albums: Vec<AlbumCard>,
    pub active_album: Option<String>,
    pub playlist: Vec<PlaylistEntry>,
    pub active_track: Option<usize>,
    pub now_playing: String,
    pub play_icon: PlayIcon,
    pub time_label: String,
    pub seek_percent: f64,
    pub volume_slider: u8,
    pub volume_icon: VolumeIcon,

    pub focus: Pane,
    pub album_cursor: usize,
    pub track_cursor: usize,
    pub side_panel_open: bool,
    pub regions: Regions,
}

impl TuiView {
    pub fn new(side_panel_open: bool) -> Self {
        Self {
            albums: Vec::new(),
            active_album: None,
            playlist: Vec::new(),
            active_track: None,
            now_playing: String::new(),
            play_icon: PlayIcon::Play,
            time_label: String::new(),
            seek_percent: 0.0,
            volume_slider: 100,
            volume_icon: VolumeIcon::Unmuted,
            focus: if side_panel_open {
                Pane::Albums
            } else {
                Pane::Playlist
            },
            album_cursor: 0,
            track_cursor: 0,
            side_panel_open,
            regions: Regions::default(),
        }
    }

    /// Title of the chosen album's card, if it has one.
    pub fn active_album_title(&self) -> Option<&str> {
        let folder = self.active_album.as_deref()?;
        self.albums
            .iter()
            .find(|c| c.folder == folder)
            .map(|c| c.title.as_str())
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Albums => self.albums.len(),
            Pane::Playlist => self.playlist.len(),
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.focus {
            Pane::Albums => &mut self.album_cursor,
            Pane::Playlist => &mut self.track_cursor,
        }
    }

    /// Move the cursor of the focused list by one row, wrapping around.
    pub fn cursor_down(&mut self) {
        let len = self.focused_len();
        if len > 0 {
            let cursor = self.focused_cursor();
            *cursor = (*cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.focused_len();
        if len > 0 {
            let cursor = self.focused_cursor();
            *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
        }
    }

    pub fn cursor_top(&mut self) {
        *self.focused_cursor() = 0;
    }

    pub fn cursor_bottom(&mut self) {
        let len = self.focused_len();
        *self.focused_cursor() = len.saturating_sub(1);
    }

    /// Switch focus between the album panel and the playlist.
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Albums => Pane::Playlist,
            Pane::Playlist if self.side_panel_open => Pane::Albums,
            Pane::Playlist => Pane::Playlist,
        };
    }

    pub fn toggle_side_panel(&mut self) {
        if self.side_panel_open {
            self.close_side_panel();
        } else {
            self.side_panel_open = true;
            self.focus = Pane::Albums;
        }
    }

    pub fn close_side_panel(&mut self) {
        self.side_panel_open = false;
        self.focus = Pane::Playlist;
    }

    /// Resolve a click at (`column`, `row`) against the last drawn regions.
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let bar = self.regions.seek_bar;
        if contains(bar, column, row) && bar.width > 0 {
            let fraction = f64::from(column - bar.x) / f64::from(bar.width);
            return Some(Hit::Seek(fraction));
        }

        if let Some(area) = self.regions.albums {
            let item_height = self.regions.album_item_height.max(1);
            if let Some(i) = list_hit(area, column, row, item_height, self.albums.len(), self.album_cursor) {
                return Some(Hit::Album(i));
            }
        }

        list_hit(
            self.regions.playlist,
            column,
            row,
            1,
            self.playlist.len(),
            self.track_cursor,
        )
        .map(Hit::Track)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Map a click inside a bordered list to an item index.
fn list_hit(
    area: Rect,
    column: u16,
    row: u16,
    item_height: u16,
    total: usize,
    selected: usize,
) -> Option<usize> {
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if !contains(inner, column, row) {
        return None;
    }
    let visible = usize::from(inner.height / item_height);
    let (start, end, _) = visible_window(total, visible, selected);
    let index = start + usize::from((row - inner.y) / item_height);
    (index < end).then_some(index)
}

impl PlayerView for TuiView {
    fn render_albums(&mut self, cards: &[AlbumCard]) {
        self.albums = cards.to_vec();
        if self.album_cursor >= self.albums.len() {
            self.album_cursor = 0;
        }
    }

    fn set_active_album(&mut self, folder: Option<&str>) {
        self.active_album = folder.map(str::to_string);
        if let Some(i) = folder.and_then(|f| self.albums.iter().position(|c| c.folder == f)) {
            self.album_cursor = i;
        }
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.playlist = entries.to_vec();
        self.track_cursor = 0;
    }

    fn set_active_track(&mut self, index: Option<usize>) {
        self.active_track = index;
        if let Some(i) = index {
            self.track_cursor = i;
        }
    }

    fn set_now_playing(&mut self, title: &str) {
        self.now_playing = title.to_string();
    }

    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.play_icon = icon;
    }

    fn set_time_label(&mut self, label: &str) {
        self.time_label = label.to_string();
    }

    fn set_seek_indicator(&mut self, percent: f64) {
        self.seek_percent = percent.clamp(0.0, 100.0);
    }

    fn set_volume_slider(&mut self, percent: u8) {
        self.volume_slider = percent.min(100);
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon = icon;
    }
}
