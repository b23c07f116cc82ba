//! Media sources: where manifests, covers and tracks are fetched from.
//!
//! A source resolves relative segments under its root into a [`Location`]
//! and fetches the bytes behind a location. Local directories and HTTP(S)
//! base URLs are supported.

use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::encoding::{canonical_name, url_segment};
use super::error::LoadError;
use super::model::Location;

pub trait MediaSource: Send + Sync {
    /// Resolve `segments` (manifest-style names) relative to the media root.
    fn locate(&self, segments: &[&str]) -> Location;

    /// Fetch the full contents behind `location`.
    fn fetch(&self, location: &Location) -> Result<Vec<u8>, LoadError>;
}

pub type SharedSource = Arc<dyn MediaSource>;

/// Build a source for `root`: URLs become [`HttpSource`], anything else a
/// [`DirSource`].
pub fn open_source(root: &str, http_timeout: Option<Duration>) -> SharedSource {
    let root = root.trim();
    if root.starts_with("http://") || root.starts_with("https://") {
        Arc::new(HttpSource::new(root, http_timeout))
    } else {
        Arc::new(DirSource::new(root))
    }
}

/// Media root on the local filesystem.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MediaSource for DirSource {
    fn locate(&self, segments: &[&str]) -> Location {
        let mut path = self.root.clone();
        for seg in segments {
            let name = canonical_name(seg);
            // Only plain names stay under the root; `/`, `..` and drive
            // prefixes are dropped.
            let mut escaped = false;
            for component in Path::new(name.as_ref()).components() {
                match component {
                    Component::Normal(part) => path.push(part),
                    _ => escaped = true,
                }
            }
            if escaped {
                warn!(segment = %seg, "dropped path components leaving the media root");
            }
        }
        Location::File(path)
    }

    fn fetch(&self, location: &Location) -> Result<Vec<u8>, LoadError> {
        match location {
            Location::File(path) => std::fs::read(path).map_err(|source| LoadError::Io {
                location: location.clone(),
                source,
            }),
            Location::Url(_) => Err(LoadError::Unsupported {
                location: location.clone(),
            }),
        }
    }
}

/// Media root behind an HTTP(S) base URL.
pub struct HttpSource {
    base: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Self {
            base: base.trim_end_matches('/').to_string(),
            agent: builder.build(),
        }
    }
}

impl MediaSource for HttpSource {
    fn locate(&self, segments: &[&str]) -> Location {
        let mut url = self.base.clone();
        for seg in segments {
            url.push('/');
            url.push_str(&url_segment(seg));
        }
        Location::Url(url)
    }

    fn fetch(&self, location: &Location) -> Result<Vec<u8>, LoadError> {
        let Location::Url(url) = location else {
            return Err(LoadError::Unsupported {
                location: location.clone(),
            });
        };

        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => LoadError::Status {
                url: url.clone(),
                status,
            },
            ureq::Error::Transport(transport) => LoadError::Transport {
                url: url.clone(),
                message: transport.to_string(),
            },
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| LoadError::Io {
                location: location.clone(),
                source,
            })?;
        Ok(bytes)
    }
}
