use std::ops::RangeInclusive;

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::{MediaPayload, ReleaseOutcome, StagedMedia};
use super::ports::MediaStore;
use super::value_objects::MediaUpload;

/// Owns the staged media of one in-flight request.
///
/// Every handle is released exactly once: either through [`MediaLease::release`]
/// or, on any early return, when the lease is dropped.
pub struct MediaLease<'a, MS>
where
    MS: MediaStore,
{
    store: &'a MS,
    staged: Vec<StagedMedia>,
    released: bool,
}

impl<'a, MS> MediaLease<'a, MS>
where
    MS: MediaStore,
{
    fn new(store: &'a MS) -> Self {
        Self {
            store,
            staged: Vec::new(),
            released: false,
        }
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn items(&self) -> &[StagedMedia] {
        &self.staged
    }

    /// Rejects the batch unless it holds an accepted number of files.
    /// The lease is consumed on failure, which releases whatever was staged.
    pub fn require(
        self,
        accepted: RangeInclusive<usize>,
        message: &str,
    ) -> Result<Self, CoreError> {
        if accepted.contains(&self.staged.len()) {
            Ok(self)
        } else {
            warn!(
                staged = self.staged.len(),
                min = accepted.start(),
                max = accepted.end(),
                "Rejecting media batch with wrong cardinality"
            );
            Err(CoreError::ValidationFailed(message.to_string()))
        }
    }

    /// Loads the staged bytes, preserving upload order.
    pub async fn payloads(&self) -> Result<Vec<MediaPayload>, CoreError> {
        try_join_all(self.staged.iter().map(|media| self.store.read(media))).await
    }

    pub fn release(mut self) {
        self.release_all();
    }

    fn release_all(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        for media in self.staged.drain(..) {
            match self.store.release(&media) {
                Ok(ReleaseOutcome::Deleted) => {
                    debug!(media_id = %media.id, "Released staged media");
                }
                Ok(ReleaseOutcome::AlreadyGone) => {
                    debug!(media_id = %media.id, "Staged media already gone");
                }
                Err(e) => {
                    warn!(media_id = %media.id, error = %e, "Failed to release staged media");
                }
            }
        }
    }
}

impl<MS> Drop for MediaLease<'_, MS>
where
    MS: MediaStore,
{
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Stages a batch of uploads as a unit. If any upload is rejected or fails
/// to stage, the ones already accepted are released before returning.
pub async fn stage_batch<MS>(
    store: &MS,
    uploads: Vec<MediaUpload>,
) -> Result<MediaLease<'_, MS>, CoreError>
where
    MS: MediaStore,
{
    let mut lease = MediaLease::new(store);

    for upload in uploads {
        upload.validate()?;
        let staged = store.stage(upload).await?;
        debug!(
            media_id = %staged.id,
            mime_type = %staged.mime_type,
            size = staged.size_bytes,
            "Staged uploaded media"
        );
        lease.staged.push(staged);
    }

    Ok(lease)
}
