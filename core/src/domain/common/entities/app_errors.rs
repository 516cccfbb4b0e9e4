use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Malformed reply from model: {0}")]
    MalformedReply(String),

    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Media storage error: {0}")]
    MediaStorage(String),
}

impl CoreError {
    /// Message that is safe to show to an end user.
    ///
    /// Only validation failures carry a corrective message; everything the
    /// collaborator produced stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::ValidationFailed(message) => message.clone(),
            CoreError::ProductNotFound(_) => {
                "Product not found. Please take a photo instead.".to_string()
            }
            CoreError::Cancelled => "Analysis was cancelled".to_string(),
            CoreError::MalformedReply(_)
            | CoreError::CollaboratorUnavailable(_)
            | CoreError::MediaStorage(_) => "AI analysis failed".to_string(),
        }
    }
}
