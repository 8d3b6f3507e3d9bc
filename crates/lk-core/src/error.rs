//! Error types for the loading collaborators.
//!
//! Registry and controller operations never fail: an unknown layer or a
//! locked layer turns the call into a no-op. Only external loading can
//! fail, and the caller needs to tell the user why.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file on disk into an image payload.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The path does not exist.
    #[error("image not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be read or decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    /// The path the failed load referred to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Decode { path, .. } => path,
        }
    }
}
