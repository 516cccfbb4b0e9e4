use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{common::entities::app_errors::CoreError, media::entities::MediaPayload};

use super::product::ProductAttributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    SingleAnalyze,
    BarcodeAnalyze,
    Compare,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::SingleAnalyze => "single-analyze",
            AnalysisKind::BarcodeAnalyze => "barcode-analyze",
            AnalysisKind::Compare => "compare",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    SingleAnalyze {
        user_goals: String,
        image: Option<MediaPayload>,
    },
    BarcodeAnalyze {
        user_goals: String,
        product: ProductAttributes,
    },
    Compare {
        user_goals: String,
        image_a: MediaPayload,
        image_b: MediaPayload,
    },
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::SingleAnalyze { .. } => AnalysisKind::SingleAnalyze,
            AnalysisRequest::BarcodeAnalyze { .. } => AnalysisKind::BarcodeAnalyze,
            AnalysisRequest::Compare { .. } => AnalysisKind::Compare,
        }
    }

    pub fn user_goals(&self) -> &str {
        match self {
            AnalysisRequest::SingleAnalyze { user_goals, .. }
            | AnalysisRequest::BarcodeAnalyze { user_goals, .. }
            | AnalysisRequest::Compare { user_goals, .. } => user_goals,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            AnalysisRequest::SingleAnalyze { user_goals, image } => {
                if image.is_none() && user_goals.trim().is_empty() {
                    return Err(CoreError::ValidationFailed(
                        "Provide a label photo or describe the product".to_string(),
                    ));
                }
            }
            AnalysisRequest::BarcodeAnalyze { product, .. } => {
                if product.product_name.trim().is_empty() {
                    return Err(CoreError::ValidationFailed(
                        "Product name is required".to_string(),
                    ));
                }
            }
            AnalysisRequest::Compare { image_a, image_b, .. } => {
                if image_a.data.is_empty() || image_b.data.is_empty() {
                    return Err(CoreError::ValidationFailed(
                        "Please upload 2 images to compare.".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
