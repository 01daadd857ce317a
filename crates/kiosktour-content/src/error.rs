use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading kiosk content from disk.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("component id not found: {0}")]
    ComponentNotFound(String),

    #[error("no pages found for document: {0} (expected page_001.png, page_002.png, ...)")]
    NoPages(String),
}

pub type ContentResult<T> = Result<T, ContentError>;
