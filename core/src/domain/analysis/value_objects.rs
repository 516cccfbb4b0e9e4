use crate::domain::{
    analysis::entities::ProductAttributes, common::entities::app_errors::CoreError,
    media::value_objects::MediaUpload,
};

pub const COMPARE_CARDINALITY_MESSAGE: &str = "Please upload 2 images to compare.";
pub const SINGLE_CARDINALITY_MESSAGE: &str = "Please upload a single label photo.";

#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub user_goals: String,
    pub images: Vec<MediaUpload>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeBarcodeInput {
    pub user_goals: String,
    pub product: ProductAttributes,
}

#[derive(Debug, Clone)]
pub struct ScanBarcodeInput {
    pub user_goals: String,
    pub barcode: String,
}

impl ScanBarcodeInput {
    /// EAN-8 through GTIN-14.
    pub fn validate(&self) -> Result<(), CoreError> {
        let barcode = self.barcode.trim();
        let valid = (8..=14).contains(&barcode.len()) && barcode.bytes().all(|b| b.is_ascii_digit());

        if valid {
            Ok(())
        } else {
            Err(CoreError::ValidationFailed(
                "Barcode must be 8 to 14 digits".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareProductsInput {
    pub user_goals: String,
    /// Upload order is significant: the first image is Product A.
    pub images: Vec<MediaUpload>,
}
