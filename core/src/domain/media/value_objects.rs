use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// A single file received from the caller, not yet staged.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data: Bytes,
}

impl MediaUpload {
    pub fn new(file_name: Option<String>, mime_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name,
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.data.is_empty() {
            return Err(CoreError::ValidationFailed(
                "Uploaded image is empty".to_string(),
            ));
        }

        if !self.mime_type.to_ascii_lowercase().starts_with("image/") {
            return Err(CoreError::ValidationFailed(format!(
                "Unsupported file type '{}'. Please upload an image",
                self.mime_type
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_upload() {
        let upload = MediaUpload::new(None, "image/png", Bytes::new());
        assert!(matches!(
            upload.validate(),
            Err(CoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_rejects_non_image_mime() {
        let upload = MediaUpload::new(
            Some("notes.pdf".to_string()),
            "application/pdf",
            Bytes::from_static(b"%PDF"),
        );
        assert!(matches!(
            upload.validate(),
            Err(CoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_accepts_image_mime_case_insensitively() {
        let upload = MediaUpload::new(None, "IMAGE/JPEG", Bytes::from_static(b"\xff\xd8"));
        assert!(upload.validate().is_ok());
    }
}
