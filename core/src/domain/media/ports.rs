use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::{MediaPayload, ReleaseOutcome, StagedMedia};
use super::value_objects::MediaUpload;

/// Port for temporary storage of uploaded media
pub trait MediaStore: Send + Sync {
    /// Persist an upload until the request that owns it completes
    fn stage(
        &self,
        upload: MediaUpload,
    ) -> impl Future<Output = Result<StagedMedia, CoreError>> + Send;

    /// Read staged bytes back for inlining into a model request
    fn read(
        &self,
        media: &StagedMedia,
    ) -> impl Future<Output = Result<MediaPayload, CoreError>> + Send;

    /// Delete staged media. Synchronous so it can run from `Drop`.
    /// Releasing media that is already gone is not an error.
    fn release(&self, media: &StagedMedia) -> Result<ReleaseOutcome, CoreError>;
}
