use axum::extract::{Multipart, multipart::Field};
use bytes::BytesMut;
use nutriscan_core::domain::media::value_objects::MediaUpload;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const USER_GOALS_FIELD: &str = "userGoals";
pub const IMAGE_FIELD: &str = "image";

/// Text and files of an analysis form, in the order they were sent.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub user_goals: String,
    pub images: Vec<MediaUpload>,
}

async fn read_image(mut field: Field<'_>, max_image_bytes: usize) -> Result<MediaUpload, ApiError> {
    let file_name = field.file_name().map(str::to_string);
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut data = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?
    {
        if data.len() + chunk.len() > max_image_bytes {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                max_image_bytes
            )));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(MediaUpload::new(file_name, mime_type, data.freeze()))
}

pub async fn read_analysis_form(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<AnalysisForm, ApiError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            USER_GOALS_FIELD => {
                form.user_goals = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read userGoals: {}", e))
                })?;
            }
            IMAGE_FIELD => {
                form.images.push(read_image(field, max_image_bytes).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}
