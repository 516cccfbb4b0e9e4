use nutriscan_core::domain::analysis::entities::{Nutriments, ProductAttributes, null_as_default};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Multipart body of the label and compare endpoints. Documentation only;
/// the handlers read the stream field by field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalysisUploadForm {
    #[serde(rename = "userGoals")]
    #[schema(example = "Diabetic, allergic to peanuts")]
    pub user_goals: Option<String>,
    /// Label photos; order is significant for comparisons.
    #[schema(value_type = Vec<String>)]
    pub image: Vec<Vec<u8>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeBarcodeRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "product_name must be between 1 and 500 characters"
    ))]
    pub product_name: String,
    pub ingredients_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutriments: Nutriments,
    pub image_url: Option<String>,
    #[serde(default, rename = "userGoals")]
    #[validate(length(max = 2000, message = "userGoals must be at most 2000 characters"))]
    pub user_goals: String,
}

impl AnalyzeBarcodeRequest {
    pub fn into_parts(self) -> (String, ProductAttributes) {
        (
            self.user_goals,
            ProductAttributes {
                product_name: self.product_name,
                ingredients_text: self.ingredients_text,
                nutriments: self.nutriments,
                image_url: self.image_url,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct ScanBarcodeParams {
    #[serde(default, rename = "userGoals")]
    #[validate(length(max = 2000, message = "userGoals must be at most 2000 characters"))]
    pub user_goals: String,
}
