//! Image attachments for vision turns
//!
//! Uploaded images are validated once here (recognised image format, at most
//! 5 MiB) and carried as data URLs. Nothing downstream re-validates them.

pub mod loader;

pub use loader::load_image;

use crate::{Error, Result};
use base64::Engine as _;

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub(crate) const NOT_AN_IMAGE: &str = "Please select an image file";
pub(crate) const TOO_LARGE: &str = "Image size should be less than 5MB";

/// A validated image held as a `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    mime_type: String,
    data_url: String,
}

impl ImageAttachment {
    /// Validate raw file contents and wrap them as a data URL.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::ImageRejected(TOO_LARGE.to_string()));
        }

        let format = image::guess_format(bytes).map_err(|e| {
            tracing::debug!("Image format sniffing failed: {}", e);
            Error::ImageRejected(NOT_AN_IMAGE.to_string())
        })?;
        let mime_type = format.to_mime_type().to_string();

        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            data_url: format!("data:{};base64,{}", mime_type, payload),
            mime_type,
        })
    }

    /// Accept an existing data URL, checking its mime type and payload.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let (mime_type, payload) = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .ok_or_else(|| Error::ImageRejected(NOT_AN_IMAGE.to_string()))?;

        if !mime_type.starts_with("image/") {
            return Err(Error::ImageRejected(NOT_AN_IMAGE.to_string()));
        }

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::ImageRejected(format!("Invalid image data: {}", e)))?;
        if decoded.len() > MAX_IMAGE_BYTES {
            return Err(Error::ImageRejected(TOO_LARGE.to_string()));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data_url: data_url.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// The base64 payload with the `data:*;base64,` prefix stripped.
    pub fn base64_payload(&self) -> &str {
        self.data_url
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(&self.data_url)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    /// PNG signature followed by a partial IHDR chunk; enough for sniffing.
    pub const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_from_bytes_detects_png() {
        let image = ImageAttachment::from_bytes(PNG_BYTES).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_from_bytes_detects_jpeg() {
        let image = ImageAttachment::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_rejects_non_image() {
        let err = ImageAttachment::from_bytes(b"just some text").unwrap_err();
        assert!(matches!(err, Error::ImageRejected(ref m) if m == NOT_AN_IMAGE));
    }

    #[test]
    fn test_from_bytes_rejects_oversized() {
        let mut bytes = PNG_BYTES.to_vec();
        bytes.resize(MAX_IMAGE_BYTES + 1, 0);
        let err = ImageAttachment::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::ImageRejected(ref m) if m == TOO_LARGE));
    }

    #[test]
    fn test_base64_payload_strips_prefix() {
        let image = ImageAttachment::from_data_url(PNG_DATA_URL).unwrap();
        assert_eq!(image.base64_payload(), "iVBORw0KGgo=");
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_payload_round_trips_file_bytes() {
        let image = ImageAttachment::from_bytes(PNG_BYTES).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(image.base64_payload())
            .unwrap();
        assert_eq!(decoded, PNG_BYTES);
    }

    #[test]
    fn test_from_data_url_rejects_non_image_mime() {
        let err = ImageAttachment::from_data_url("data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, Error::ImageRejected(_)));
    }

    #[test]
    fn test_from_data_url_rejects_missing_prefix() {
        assert!(ImageAttachment::from_data_url("iVBORw0KGgo=").is_err());
    }

    #[test]
    fn test_from_data_url_rejects_bad_base64() {
        let err = ImageAttachment::from_data_url("data:image/png;base64,!!!").unwrap_err();
        assert!(matches!(err, Error::ImageRejected(_)));
    }
}
