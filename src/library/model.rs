use std::path::PathBuf;

use serde::Deserialize;

/// Top-level manifest listing every album and its track filenames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub albums: Vec<Album>,
}

impl Manifest {
    /// Look up an album by its folder identifier.
    pub fn album(&self, folder: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.folder == folder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Album {
    pub folder: String,
    #[serde(default)]
    pub tracks: Vec<String>,
}

/// Display metadata stored next to an album's tracks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlbumInfo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Where a manifest document, cover or track lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::File(p) => write!(f, "{}", p.display()),
            Location::Url(u) => f.write_str(u),
        }
    }
}

/// A rendered album card: metadata tagged with the folder it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCard {
    pub folder: String,
    pub title: String,
    pub description: String,
    pub cover: Location,
}
