//! Album manifest loading.
//!
//! The manifest lists albums (folder + track filenames); each album folder
//! carries an info document and a cover image. Everything is fetched through a
//! [`MediaSource`], either a local directory or an HTTP(S) base URL.

mod encoding;
mod error;
mod load;
mod model;
mod source;

pub use encoding::{canonical_name, display_name, url_segment};
pub use error::LoadError;
pub use load::Library;
pub use model::*;
pub use source::{DirSource, HttpSource, MediaSource, SharedSource, open_source};
