//! Image backgrounds
//!
//! Uploaded images are stored inline as base64 data URIs so a saved zine
//! carries its own backgrounds.

use std::path::Path;

use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image type: {0}")]
    UnsupportedFormat(String),
}

fn mime_type(path: &Path) -> Result<&'static str, ImageError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(ImageError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read an image file into a `data:` URI
pub async fn load_image_data_uri(path: impl AsRef<Path>) -> Result<String, ImageError> {
    let path = path.as_ref();
    let mime = mime_type(path)?;
    let bytes = tokio::fs::read(path).await?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("a.PNG")).unwrap(), "image/png");
        assert_eq!(mime_type(Path::new("b.jpeg")).unwrap(), "image/jpeg");
        assert!(matches!(
            mime_type(Path::new("notes.txt")),
            Err(ImageError::UnsupportedFormat(_))
        ));
        assert!(mime_type(Path::new("no_extension")).is_err());
    }

    #[tokio::test]
    async fn test_load_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.gif");
        tokio::fs::write(&path, b"GIF89a").await.unwrap();

        let uri = load_image_data_uri(&path).await.unwrap();
        assert_eq!(uri, "data:image/gif;base64,R0lGODlh");
    }
}
