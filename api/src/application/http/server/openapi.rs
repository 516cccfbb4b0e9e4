use utoipa::OpenApi;

use crate::application::http::{analysis::router::AnalysisApiDoc, health::__path_health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutriscan API",
        description = "Health verdicts for packaged food labels"
    ),
    paths(health),
    nest(
        (path = "/api", api = AnalysisApiDoc),
    )
)]
pub struct ApiDoc;
