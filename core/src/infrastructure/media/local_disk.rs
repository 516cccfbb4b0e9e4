use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{MediaConfig, entities::app_errors::CoreError, generate_uuid_v7},
    media::{
        entities::{MediaPayload, ReleaseOutcome, StagedMedia},
        ports::MediaStore,
        value_objects::MediaUpload,
    },
};

/// Stages uploads as files in a local directory.
#[derive(Debug, Clone)]
pub struct LocalDiskMediaStore {
    root: PathBuf,
}

impl LocalDiskMediaStore {
    pub async fn new(config: MediaConfig) -> Result<Self, CoreError> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|e| {
                CoreError::MediaStorage(format!(
                    "Failed to create upload directory {}: {}",
                    config.upload_dir.display(),
                    e
                ))
            })?;

        tracing::info!(upload_dir = %config.upload_dir.display(), "Media store ready");

        Ok(Self {
            root: config.upload_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, media: &StagedMedia) -> PathBuf {
        self.root.join(&media.key)
    }
}

impl MediaStore for LocalDiskMediaStore {
    #[instrument(skip(self, upload), fields(mime_type = %upload.mime_type, size = upload.data.len()))]
    async fn stage(&self, upload: MediaUpload) -> Result<StagedMedia, CoreError> {
        let id = generate_uuid_v7();
        let media = StagedMedia {
            id,
            key: format!("{}.upload", id),
            mime_type: upload.mime_type,
            size_bytes: upload.data.len(),
        };

        tokio::fs::write(self.path_for(&media), &upload.data)
            .await
            .map_err(|e| CoreError::MediaStorage(format!("Failed to stage upload: {}", e)))?;

        Ok(media)
    }

    async fn read(&self, media: &StagedMedia) -> Result<MediaPayload, CoreError> {
        let data = tokio::fs::read(self.path_for(media))
            .await
            .map_err(|e| CoreError::MediaStorage(format!("Failed to read staged upload: {}", e)))?;

        Ok(MediaPayload {
            mime_type: media.mime_type.clone(),
            data: Bytes::from(data),
        })
    }

    fn release(&self, media: &StagedMedia) -> Result<ReleaseOutcome, CoreError> {
        match std::fs::remove_file(self.path_for(media)) {
            Ok(()) => Ok(ReleaseOutcome::Deleted),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReleaseOutcome::AlreadyGone),
            Err(e) => Err(CoreError::MediaStorage(format!(
                "Failed to delete staged upload: {}",
                e
            ))),
        }
    }
}
