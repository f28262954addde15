// Profile image upload: local file handling and pre-flight checks

use crate::api::MultipartBody;
use crate::error::ValidationError;
use std::path::Path;

/// Bytes per megabyte as used for upload limits
pub const MIB: u64 = 1024 * 1024;

/// Multipart field name the backend expects the image under
pub const UPLOAD_FIELD: &str = "file";

/// Image types the backend accepts
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// An image picked for upload
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Multipart body with the image under the `file` field
    pub fn into_multipart(self) -> MultipartBody {
        MultipartBody::new().file(
            UPLOAD_FIELD,
            self.filename,
            Some(self.content_type),
            self.bytes,
        )
    }
}

/// Limits applied before an image is sent
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * MIB,
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    /// Check type first, then size
    pub fn validate(&self, file: &ImageFile) -> Result<(), ValidationError> {
        let essence = file
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if !self.allowed_types.iter().any(|t| *t == essence) {
            return Err(ValidationError::FileTypeNotAllowed {
                content_type: file.content_type.clone(),
            });
        }

        if file.size() > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max_mb: self.max_bytes / MIB,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MultipartPart;

    #[test]
    fn test_accepts_allowed_image_within_limit() {
        let policy = UploadPolicy::default();
        let file = ImageFile::new("me.webp", "image/webp", vec![0; 1024]);
        assert!(policy.validate(&file).is_ok());

        // Exactly at the limit is fine
        let file = ImageFile::new("big.png", "image/png", vec![0; (5 * MIB) as usize]);
        assert!(policy.validate(&file).is_ok());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let policy = UploadPolicy::default();
        let file = ImageFile::new("huge.jpg", "image/jpeg", vec![0; (6 * MIB) as usize]);

        let err = policy.validate(&file).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: 6 * MIB,
                max_mb: 5
            }
        );
        assert_eq!(err.to_string(), "File is too large (max 5MB)");
    }

    #[test]
    fn test_rejects_disallowed_type_before_size() {
        let policy = UploadPolicy::default();
        let file = ImageFile::new("doc.pdf", "application/pdf", vec![0; (6 * MIB) as usize]);

        let err = policy.validate(&file).unwrap_err();
        assert!(matches!(err, ValidationError::FileTypeNotAllowed { .. }));
        assert_eq!(err.to_string(), "Only JPG/PNG/WebP files can be uploaded");
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        let policy = UploadPolicy::default();
        let file = ImageFile::new("me.png", "Image/PNG; charset=binary", vec![1, 2, 3]);
        assert!(policy.validate(&file).is_ok());
    }

    #[test]
    fn test_custom_policy() {
        let policy = UploadPolicy::default()
            .with_max_bytes(MIB)
            .with_allowed_types(["image/gif"]);
        assert!(policy
            .validate(&ImageFile::new("a.gif", "image/gif", vec![0; 10]))
            .is_ok());
        assert!(policy
            .validate(&ImageFile::new("a.png", "image/png", vec![0; 10]))
            .is_err());
    }

    #[test]
    fn test_into_multipart_uses_file_field() {
        let body = ImageFile::new("me.png", "image/png", vec![1, 2]).into_multipart();
        match &body.parts()[0] {
            MultipartPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                assert_eq!(name, "file");
                assert_eq!(filename, "me.png");
                assert_eq!(content_type.as_deref(), Some("image/png"));
                assert_eq!(bytes, &vec![1, 2]);
            }
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.jpg");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let file = ImageFile::from_path(&path).await.unwrap();
        assert_eq!(file.filename, "avatar.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.size(), 3);
    }
}
