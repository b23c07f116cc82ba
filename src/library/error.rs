use thiserror::Error;

use super::model::Location;

/// Failures while fetching or decoding manifest documents and media.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: Location,
        #[source]
        source: std::io::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{location} is not a valid {document}: {source}")]
    Json {
        location: Location,
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{location} cannot be fetched by this source")]
    Unsupported { location: Location },
}
