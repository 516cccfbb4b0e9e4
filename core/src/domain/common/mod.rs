use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_USER_GOALS: &str = "General healthy eating";

#[derive(Clone, Debug)]
pub struct NutriscanConfig {
    pub llm: LLMConfig,
    pub product_lookup: ProductLookupConfig,
    pub media: MediaConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct ProductLookupConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub upload_dir: PathBuf,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let nanos = now.timestamp_subsec_nanos();
    let timestamp = Timestamp::from_unix(NoContext, seconds, nanos);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

/// Falls back to the generic goal when the user left the field blank.
pub fn goals_or_default(user_goals: &str) -> &str {
    let trimmed = user_goals.trim();
    if trimmed.is_empty() {
        DEFAULT_USER_GOALS
    } else {
        trimmed
    }
}
