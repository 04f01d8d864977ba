//! Image attachments for generation requests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use postpilot_core::gateway::ImageAttachment;
use postpilot_core::{PostPilotError, Result};
use std::path::Path;

/// Infers the MIME type from a filename extension using `mime_guess`.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Reads an image file and encodes it for a webhook payload.
///
/// Files whose extension does not map to an `image/*` type are rejected with a
/// validation error before anything is read.
pub async fn load_image_attachment(path: impl AsRef<Path>) -> Result<ImageAttachment> {
    let path = path.as_ref();
    let mime_type = infer_mime_type(path);
    if !mime_type.starts_with("image/") {
        return Err(PostPilotError::validation(format!(
            "{} is not an image ({})",
            path.display(),
            mime_type
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    tracing::debug!("[Attachment] Loaded {} ({} bytes, {})", file_name, bytes.len(), mime_type);

    Ok(ImageAttachment {
        file_name,
        mime_type,
        data_base64: BASE64_STANDARD.encode(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_loads_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("launch.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let attachment = load_image_attachment(&path).await.unwrap();
        assert_eq!(attachment.file_name, "launch.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.data_base64, "iVBORw==");
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = load_image_attachment(&path).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_image_attachment(temp_dir.path().join("gone.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, PostPilotError::Io { .. }));
    }
}
