use super::*;
use crate::audio::{AudioOutput, PlaybackError};
use crate::config::{AudioSettings, SourceSettings};
use crate::library::{AlbumCard, DirSource, Library, Location};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct FakeOutput {
    loaded: Vec<Location>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    fail_play: bool,
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, location: Location) {
        self.loaded.push(location);
        self.paused = true;
        self.position = Duration::ZERO;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.fail_play || self.loaded.is_empty() {
            return Err(PlaybackError::NothingLoaded);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn seek_to(&mut self, position: Duration) {
        self.position = position;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

#[derive(Default)]
struct RecordingView {
    albums: Vec<AlbumCard>,
    active_album: Option<String>,
    playlist: Vec<PlaylistEntry>,
    active_track: Option<usize>,
    now_playing: String,
    play_icon: PlayIcon,
    time_label: String,
    seek_percent: f64,
    volume_slider: u8,
    volume_icon: VolumeIcon,
}

impl PlayerView for RecordingView {
    fn render_albums(&mut self, cards: &[AlbumCard]) {
        self.albums = cards.to_vec();
    }

    fn set_active_album(&mut self, folder: Option<&str>) {
        self.active_album = folder.map(str::to_string);
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.playlist = entries.to_vec();
    }

    fn set_active_track(&mut self, index: Option<usize>) {
        self.active_track = index;
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
        self.seek_percent = percent;
    }

    fn set_volume_slider(&mut self, percent: u8) {
        self.volume_slider = percent;
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon = icon;
    }
}

type TestPlayer = Player<FakeOutput, RecordingView>;

fn write_album(root: &Path, folder: &str, title: Option<&str>) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    if let Some(title) = title {
        fs::write(
            dir.join("info.json"),
            format!(r#"{{"title":"{title}","description":"about {title}"}}"#),
        )
        .unwrap();
    }
}

/// Media root with three albums; "Broken" has no info document.
fn media_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("index.json"),
        r#"{"albums":[
            {"folder":"Saiyaara","tracks":["Intro.mp3","Tum%20Hi%20Ho.mp3","Outro.mp3"]},
            {"folder":"Broken","tracks":["x.mp3"]},
            {"folder":"Chill","tracks":["Rain Song.mp3"]},
            {"folder":"Empty","tracks":[]}
        ]}"#,
    )
    .unwrap();
    write_album(dir.path(), "Saiyaara", Some("Saiyaara"));
    write_album(dir.path(), "Broken", None);
    write_album(dir.path(), "Chill", Some("Chill Vibes"));
    write_album(dir.path(), "Empty", Some("Nothing Here"));
    dir
}

fn player_at(root: &Path) -> TestPlayer {
    let library = Library::new(Arc::new(DirSource::new(root)), &SourceSettings::default());
    let mut player = Player::new(
        library,
        FakeOutput::default(),
        RecordingView::default(),
        &AudioSettings::default(),
    );
    player.load_manifest();
    player
}

fn loaded_player(root: &Path) -> TestPlayer {
    let mut player = player_at(root);
    player.render_albums();
    player
}

fn last_loaded(player: &TestPlayer) -> Location {
    player.output().loaded.last().cloned().unwrap()
}

#[test]
fn seconds_to_minutes_seconds_formats_and_clamps() {
    assert_eq!(seconds_to_minutes_seconds(125.0), "02:05");
    assert_eq!(seconds_to_minutes_seconds(59.9), "00:59");
    assert_eq!(seconds_to_minutes_seconds(3_600.0), "60:00");
    assert_eq!(seconds_to_minutes_seconds(f64::NAN), "00:00");
    assert_eq!(seconds_to_minutes_seconds(-3.0), "00:00");
    assert_eq!(seconds_to_minutes_seconds(f64::INFINITY), "00:00");
}

#[test]
fn time_label_and_progress_handle_unknown_duration() {
    assert_eq!(time_label(65.0, f64::NAN), "01:05 / 00:00");
    assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
    assert_eq!(progress_percent(30.0, 120.0), 25.0);
}

#[test]
fn render_albums_skips_albums_without_info() {
    let root = media_root();
    let player = loaded_player(root.path());

    let folders: Vec<&str> = player
        .view()
        .albums
        .iter()
        .map(|c| c.folder.as_str())
        .collect();
    assert_eq!(folders, vec!["Saiyaara", "Chill", "Empty"]);

    let chill = &player.view().albums[1];
    assert_eq!(chill.title, "Chill Vibes");
    assert_eq!(chill.description, "about Chill Vibes");
    assert_eq!(
        chill.cover,
        Location::File(root.path().join("Chill").join("cover.jpeg"))
    );
}

#[test]
fn missing_manifest_leaves_player_empty_but_usable() {
    let root = tempfile::tempdir().unwrap();
    let mut player = loaded_player(root.path());
    assert!(player.view().albums.is_empty());

    player.preload_first_album();
    player.next();
    player.toggle_play_pause();
    assert!(player.output().loaded.is_empty());
    assert!(player.state().current_folder.is_none());
}

#[test]
fn play_without_album_is_a_no_op() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.play_track("Intro.mp3", false);
    assert!(player.output().loaded.is_empty());
    assert_eq!(player.view().play_icon, PlayIcon::Play);
}

#[test]
fn opening_an_album_renders_playlist_and_plays_first_track() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.activate_card(0);

    let labels: Vec<&str> = player
        .view()
        .playlist
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Intro.mp3", "Tum Hi Ho.mp3", "Outro.mp3"]);
    assert_eq!(player.state().current_folder.as_deref(), Some("Saiyaara"));
    assert_eq!(player.view().active_album.as_deref(), Some("Saiyaara"));
    assert_eq!(player.state().current_index, Some(0));
    assert_eq!(
        last_loaded(&player),
        Location::File(root.path().join("Saiyaara").join("Intro.mp3"))
    );
    assert!(!player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Pause);
    assert_eq!(player.view().time_label, "00:00 / 00:00");
}

#[test]
fn activating_entry_plays_that_track() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");
    player.activate_entry(1);

    assert_eq!(player.state().current_index, Some(1));
    assert_eq!(player.view().active_track, Some(1));
    assert_eq!(player.view().now_playing, "Tum Hi Ho.mp3");
    assert_eq!(
        last_loaded(&player),
        Location::File(root.path().join("Saiyaara").join("Tum Hi Ho.mp3"))
    );
}

#[test]
fn opening_an_empty_album_plays_nothing() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Empty");
    assert!(player.view().playlist.is_empty());
    assert!(player.output().loaded.is_empty());
    assert_eq!(player.state().current_folder.as_deref(), Some("Empty"));
}

#[test]
fn unknown_album_yields_empty_track_list() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");
    player.open_album("Nope");
    assert!(player.state().track_list.is_empty());
    assert!(player.view().playlist.is_empty());
    assert_eq!(player.state().current_folder.as_deref(), Some("Nope"));
}

#[test]
fn preload_loads_first_track_paused() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.preload_first_album();

    assert_eq!(player.state().current_index, Some(0));
    assert_eq!(player.output().loaded.len(), 1);
    assert!(player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Play);
}

#[test]
fn toggle_play_pause_flips_output_and_icon() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.preload_first_album();

    player.toggle_play_pause();
    assert!(!player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Pause);

    player.toggle_play_pause();
    assert!(player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Play);
}

#[test]
fn failed_playback_start_keeps_play_icon() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.output.fail_play = true;
    player.open_album("Chill");

    assert_eq!(player.output().loaded.len(), 1);
    assert!(player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Play);
}

#[test]
fn next_and_previous_move_by_one_and_stop_at_edges() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");

    player.previous();
    assert_eq!(player.state().current_index, Some(0));
    assert_eq!(player.output().loaded.len(), 1);

    player.next();
    assert_eq!(player.state().current_index, Some(1));
    player.next();
    assert_eq!(player.state().current_index, Some(2));
    assert_eq!(player.output().loaded.len(), 3);

    player.next();
    assert_eq!(player.state().current_index, Some(2));
    assert_eq!(player.output().loaded.len(), 3);
    assert!(player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Play);

    player.previous();
    assert_eq!(player.state().current_index, Some(1));
    assert_eq!(
        last_loaded(&player),
        Location::File(root.path().join("Saiyaara").join("Tum Hi Ho.mp3"))
    );
}

#[test]
fn track_outside_the_list_can_still_be_paused() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.select_album("Saiyaara");
    player.play_track("Bonus.mp3", false);

    assert!(!player.output().is_paused());
    assert_eq!(player.state().current_index, None);
    assert_eq!(player.state().current_track(), Some("Bonus.mp3"));
    assert_eq!(player.view().now_playing, "Bonus.mp3");

    player.toggle_play_pause();
    assert!(player.output().is_paused());
    assert_eq!(player.view().play_icon, PlayIcon::Play);

    player.toggle_play_pause();
    assert!(!player.output().is_paused());
    player.on_progress();
    assert_eq!(player.view().play_icon, PlayIcon::Pause);

    // No list position to move from: next only pauses.
    player.next();
    assert!(player.output().is_paused());
    assert_eq!(player.output().loaded.len(), 1);
}

#[test]
fn navigation_without_current_track_is_a_no_op() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.select_album("Saiyaara");
    player.next();
    player.previous();
    assert!(player.output().loaded.is_empty());
}

#[test]
fn duplicate_filenames_navigate_by_position() {
    let root = tempfile::tempdir().unwrap();
    fs::write(
        root.path().join("index.json"),
        r#"{"albums":[{"folder":"Loop","tracks":["same.mp3","same.mp3","end.mp3"]}]}"#,
    )
    .unwrap();
    write_album(root.path(), "Loop", Some("Loop"));

    let mut player = loaded_player(root.path());
    player.open_album("Loop");
    player.activate_entry(1);
    player.next();
    assert_eq!(player.state().current_index, Some(2));
}

#[test]
fn seek_half_way_moves_position_and_indicator() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");
    player.output.duration = Some(Duration::from_secs(200));

    player.seek(0.5);
    assert_eq!(player.output().position, Duration::from_secs(100));
    assert_eq!(player.view().seek_percent, 50.0);

    player.seek(1.7);
    assert_eq!(player.output().position, Duration::from_secs(200));
    assert_eq!(player.view().seek_percent, 100.0);
}

#[test]
fn seek_by_steps_relative_to_position() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");
    player.output.duration = Some(Duration::from_secs(100));
    player.output.position = Duration::from_secs(40);

    player.seek_by(10.0);
    assert_eq!(player.output().position, Duration::from_secs(50));
    player.seek_by(-80.0);
    assert_eq!(player.output().position, Duration::ZERO);
}

#[test]
fn set_volume_then_toggle_mute_cycles_between_unmute_level_and_silence() {
    let root = media_root();
    let mut player = loaded_player(root.path());

    player.set_volume(0);
    assert_eq!(player.output().volume(), 0.0);
    assert_eq!(player.view().volume_icon, VolumeIcon::Muted);

    player.toggle_mute();
    assert_eq!(player.output().volume(), 0.10);
    assert_eq!(player.view().volume_slider, 10);
    assert_eq!(player.view().volume_icon, VolumeIcon::Unmuted);
    assert!(!player.state().muted);

    player.toggle_mute();
    assert_eq!(player.output().volume(), 0.0);
    assert_eq!(player.view().volume_slider, 0);
    assert_eq!(player.view().volume_icon, VolumeIcon::Muted);
    assert!(player.state().muted);
}

#[test]
fn set_volume_converts_percent_and_unmutes() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.toggle_mute();
    assert!(player.state().muted);

    player.set_volume(65);
    assert_eq!(player.output().volume(), 0.65);
    assert_eq!(player.view().volume_slider, 65);
    assert_eq!(player.view().volume_icon, VolumeIcon::Unmuted);

    player.volume_by(50);
    assert_eq!(player.view().volume_slider, 100);
    player.volume_by(-120);
    assert_eq!(player.view().volume_slider, 0);
}

#[test]
fn on_progress_updates_label_indicator_and_icon() {
    let root = media_root();
    let mut player = loaded_player(root.path());
    player.open_album("Saiyaara");

    player.output.position = Duration::from_secs(30);
    player.on_progress();
    assert_eq!(player.view().time_label, "00:30 / 00:00");
    assert_eq!(player.view().seek_percent, 0.0);

    player.output.duration = Some(Duration::from_secs(125));
    player.output.position = Duration::from_millis(62_500);
    player.on_progress();
    assert_eq!(player.view().time_label, "01:02 / 02:05");
    assert_eq!(player.view().seek_percent, 50.0);

    // The output ran out on its own.
    player.output.paused = true;
    player.on_progress();
    assert_eq!(player.view().play_icon, PlayIcon::Play);
}

#[test]
fn playlist_entries_decode_labels_in_order() {
    let tracks = vec!["b%20side.mp3".to_string(), "a.mp3".to_string()];
    let entries = playlist_entries(&tracks);
    assert_eq!(entries[0].label, "b side.mp3");
    assert_eq!(entries[1].label, "a.mp3");
}
