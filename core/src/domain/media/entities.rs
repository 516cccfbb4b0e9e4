use bytes::Bytes;
use uuid::Uuid;

/// Handle to an uploaded file parked in temporary storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMedia {
    pub id: Uuid,
    pub key: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Image bytes ready to be inlined into a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Deleted,
    AlreadyGone,
}
