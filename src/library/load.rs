use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SourceSettings;

use super::error::LoadError;
use super::model::{AlbumInfo, Location, Manifest};
use super::source::SharedSource;

/// Manifest loader bound to one media source and its file naming convention.
#[derive(Clone)]
pub struct Library {
    source: SharedSource,
    manifest_file: String,
    info_file: String,
    cover_file: String,
}

impl Library {
    pub fn new(source: SharedSource, settings: &SourceSettings) -> Self {
        Self {
            source,
            manifest_file: settings.manifest_file.clone(),
            info_file: settings.info_file.clone(),
            cover_file: settings.cover_file.clone(),
        }
    }

    /// Shared handle to the underlying source, for fetching track bytes.
    pub fn source(&self) -> SharedSource {
        self.source.clone()
    }

    /// Fetch and parse the album manifest.
    pub fn load_manifest(&self) -> Result<Manifest, LoadError> {
        let location = self.source.locate(&[&self.manifest_file]);
        let manifest: Manifest = self.fetch_json(&location, "album manifest")?;
        debug!(albums = manifest.albums.len(), %location, "loaded manifest");
        Ok(manifest)
    }

    /// Fetch and parse the metadata document of album `folder`.
    pub fn load_album_info(&self, folder: &str) -> Result<AlbumInfo, LoadError> {
        let location = self.source.locate(&[folder, &self.info_file]);
        self.fetch_json(&location, "album info")
    }

    pub fn cover_location(&self, folder: &str) -> Location {
        self.source.locate(&[folder, &self.cover_file])
    }

    pub fn track_location(&self, folder: &str, track: &str) -> Location {
        self.source.locate(&[folder, track])
    }

    fn fetch_json<T: DeserializeOwned>(
        &self,
        location: &Location,
        document: &'static str,
    ) -> Result<T, LoadError> {
        let bytes = self.source.fetch(location)?;
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
            location: location.clone(),
            document,
            source,
        })
    }
}
