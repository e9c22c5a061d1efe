use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, StudioError};

/// A base64-encoded image with its MIME type. Serializes as Gemini `inlineData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Wraps already encoded data; the MIME type must be an `image/*` type.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        if !is_image_mime(&mime_type) {
            return Err(StudioError::ValidationError(format!(
                "expected an image, got '{}'",
                mime_type
            )));
        }
        Ok(Self {
            mime_type,
            data: data.into(),
        })
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let mime_type = mime_for_path(path).ok_or_else(|| {
            StudioError::ValidationError(format!(
                "{} is not a supported image file",
                path.display()
            ))
        })?;
        let bytes = fs::read(path)?;
        log::debug!(
            "Encoded {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        Self::from_bytes(mime_type, &bytes)
    }

    /// Parses a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::EncodingError("not a data URI".into()))?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| StudioError::EncodingError("data URI is not base64".into()))?;
        Self::new(mime_type, data)
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| StudioError::EncodingError(e.to_string()))
    }
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "image/heif" => "heif",
        "image/bmp" => "bmp",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_image_mime() {
        assert!(matches!(
            ImagePayload::new("video/mp4", "AAAA"),
            Err(StudioError::ValidationError(_))
        ));
    }

    #[test]
    fn test_data_uri() {
        let payload = ImagePayload::from_bytes("image/png", &[1, 2, 3]).unwrap();
        assert_eq!(payload.data_uri(), "data:image/png;base64,AQID");
        let parsed = ImagePayload::from_data_uri("data:image/png;base64,AQID").unwrap();
        assert_eq!(parsed, payload);
        assert!(ImagePayload::from_data_uri("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let payload = ImagePayload::new("image/png", "not base64!").unwrap();
        assert!(matches!(payload.decode(), Err(StudioError::EncodingError(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shirt.JPG");
        fs::write(&path, b"fake jpeg").unwrap();
        let payload = ImagePayload::from_path(&path).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.decode().unwrap(), b"fake jpeg".to_vec());

        let text = dir.path().join("notes.txt");
        fs::write(&text, b"hello").unwrap();
        assert!(matches!(
            ImagePayload::from_path(&text),
            Err(StudioError::ValidationError(_))
        ));
    }

    #[test]
    fn test_serializes_as_inline_data() {
        let payload = ImagePayload::new("image/webp", "UklG").unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["mimeType"], "image/webp");
        assert_eq!(json["data"], "UklG");
    }
}
