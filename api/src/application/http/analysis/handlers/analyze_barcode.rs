use axum::extract::State;
use nutriscan_core::domain::analysis::{
    entities::BarcodeVerdict, ports::AnalysisService, value_objects::AnalyzeBarcodeInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    analysis::validators::AnalyzeBarcodeRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BarcodeVerdictResponse {
    pub success: bool,
    pub data: BarcodeVerdict,
}

#[utoipa::path(
    post,
    path = "/barcode",
    tag = "analysis",
    summary = "Analyze a scanned product record",
    description = "Judges product attributes already resolved by the client's barcode lookup",
    request_body = AnalyzeBarcodeRequest,
    responses(
        (status = 200, body = BarcodeVerdictResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_barcode(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeBarcodeRequest>,
) -> Result<Response<BarcodeVerdictResponse>, ApiError> {
    let (user_goals, product) = payload.into_parts();

    let result = state
        .service
        .analyze_barcode(
            AnalyzeBarcodeInput {
                user_goals,
                product,
            },
            state.request_token(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(BarcodeVerdictResponse {
        success: true,
        data: result,
    }))
}
