//! Image loading collaborator.
//!
//! Loading happens before an object is created, never during interaction.
//! Failures are returned to the caller untouched; there is no retry.

use crate::error::LoadError;
use crate::model::ImageObject;
use std::path::Path;

/// Decode the file at `path` into an image payload.
///
/// # Errors
/// `LoadError::NotFound` if the path does not exist, `LoadError::Decode`
/// if it cannot be read or is not a supported image format.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageObject, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let decoded = image::open(path).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let bitmap = decoded.to_rgba8();
    log::debug!(
        "loaded image {} ({}×{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    );

    Ok(ImageObject::from_bitmap(bitmap, Some(path.to_path_buf())))
}
