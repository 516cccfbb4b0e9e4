use axum::extract::{Multipart, State};
use nutriscan_core::domain::analysis::{
    entities::CanonicalVerdict, ports::AnalysisService, value_objects::AnalyzeLabelInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    analysis::{multipart::read_analysis_form, validators::AnalysisUploadForm},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeLabelResponse {
    pub success: bool,
    pub data: CanonicalVerdict,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    summary = "Analyze a food label photo",
    description = "Judges a single label photo, or a typed product description when no photo is sent, against the user's goals",
    request_body(content = AnalysisUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_label(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let form = read_analysis_form(multipart, state.args.server.max_image_bytes).await?;

    let verdict = state
        .service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: form.user_goals,
                images: form.images,
            },
            state.request_token(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeLabelResponse {
        success: true,
        data: verdict,
    }))
}
