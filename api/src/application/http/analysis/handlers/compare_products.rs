use axum::extract::{Multipart, State};
use nutriscan_core::domain::analysis::{
    entities::CanonicalComparison, ports::AnalysisService, value_objects::CompareProductsInput,
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
pub struct CompareProductsResponse {
    pub success: bool,
    pub data: CanonicalComparison,
}

#[utoipa::path(
    post,
    path = "/compare",
    tag = "analysis",
    summary = "Compare two products",
    description = "Scores two label photos side by side. The first image is Product A",
    request_body(content = AnalysisUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = CompareProductsResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn compare_products(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<CompareProductsResponse>, ApiError> {
    let form = read_analysis_form(multipart, state.args.server.max_image_bytes).await?;

    let comparison = state
        .service
        .compare_products(
            CompareProductsInput {
                user_goals: form.user_goals,
                images: form.images,
            },
            state.request_token(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CompareProductsResponse {
        success: true,
        data: comparison,
    }))
}
