use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_barcode::{__path_analyze_barcode, analyze_barcode},
    analyze_label::{__path_analyze_label, analyze_label},
    compare_products::{__path_compare_products, compare_products},
    scan_barcode::{__path_scan_barcode, scan_barcode},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_label, analyze_barcode, scan_barcode, compare_products))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyze", state.args.server.root_path),
            post(analyze_label),
        )
        .route(
            &format!("{}/api/barcode", state.args.server.root_path),
            post(analyze_barcode),
        )
        .route(
            &format!("{}/api/barcode/{{code}}", state.args.server.root_path),
            get(scan_barcode),
        )
        .route(
            &format!("{}/api/compare", state.args.server.root_path),
            post(compare_products),
        )
}
