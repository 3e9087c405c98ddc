use super::{ImageAttachment, MAX_IMAGE_BYTES, NOT_AN_IMAGE, TOO_LARGE};
use crate::{Error, Result};
use std::path::Path;

/// Read an image file from disk and validate it as an attachment.
///
/// The size check runs against file metadata first so oversized files are
/// rejected without being read.
pub async fn load_image(path: &Path) -> Result<ImageAttachment> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(Error::ImageRejected(NOT_AN_IMAGE.to_string()));
    }
    if metadata.len() > MAX_IMAGE_BYTES as u64 {
        return Err(Error::ImageRejected(TOO_LARGE.to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    let attachment = ImageAttachment::from_bytes(&bytes)?;

    tracing::debug!(
        "Loaded image {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        attachment.mime_type()
    );
    Ok(attachment)
}
