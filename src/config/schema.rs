use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Media root: a local directory or an `http://` / `https://` base URL.
    /// The first command-line argument overrides it.
    pub root: String,
    /// Manifest document name, relative to `root`.
    pub manifest_file: String,
    /// Per-album metadata document name, relative to the album folder.
    pub info_file: String,
    /// Cover image name, relative to the album folder.
    pub cover_file: String,
    /// Optional HTTP timeout in seconds. Unset means requests never time out.
    pub http_timeout_secs: Option<u64>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            root: "songs".to_string(),
            manifest_file: "index.json".to_string(),
            info_file: "info.json".to_string(),
            cover_file: "cover.jpeg".to_string(),
            http_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume at startup, in percent (0-100).
    pub initial_volume: u8,
    /// Volume restored when unmuting from silence, in percent (1-100).
    pub unmute_volume: u8,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 100,
            unmute_volume: 10,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seek-bar step when pressing `H` / `L`, in percent of the track.
    pub seek_step_percent: u8,
    /// Volume step when pressing `-` / `+`, in percent.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the album side panel starts open.
    pub show_side_panel: bool,
    /// Whether album cards show the description line.
    pub show_descriptions: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ encore ~ ".to_string(),
            show_side_panel: true,
            show_descriptions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. `info` or `encore=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for the log file. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    /// Log file name inside `directory`.
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "encore.log".to_string(),
        }
    }
}
