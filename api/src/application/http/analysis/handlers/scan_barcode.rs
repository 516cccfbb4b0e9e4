use axum::extract::{Path, Query, State};
use nutriscan_core::domain::analysis::{ports::AnalysisService, value_objects::ScanBarcodeInput};
use validator::Validate;

use crate::application::http::{
    analysis::{
        handlers::analyze_barcode::BarcodeVerdictResponse, validators::ScanBarcodeParams,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/barcode/{code}",
    tag = "analysis",
    summary = "Look up a barcode and analyze the product",
    params(
        ("code" = String, Path, description = "EAN-8 to GTIN-14 barcode"),
        ScanBarcodeParams
    ),
    responses(
        (status = 200, body = BarcodeVerdictResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn scan_barcode(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Query(params): Query<ScanBarcodeParams>,
) -> Result<Response<BarcodeVerdictResponse>, ApiError> {
    params.validate()?;

    let result = state
        .service
        .scan_barcode(
            ScanBarcodeInput {
                user_goals: params.user_goals,
                barcode: code,
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
