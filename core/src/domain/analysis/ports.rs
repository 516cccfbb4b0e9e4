use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::domain::{
    analysis::{
        entities::{BarcodeVerdict, CanonicalComparison, CanonicalVerdict, ProductAttributes},
        prompt::AnalysisEnvelope,
        value_objects::{
            AnalyzeBarcodeInput, AnalyzeLabelInput, CompareProductsInput, ScanBarcodeInput,
        },
    },
    common::entities::app_errors::CoreError,
};

/// LLM Client trait for calling the generative model
pub trait LLMClient: Send + Sync {
    /// Sends instructions plus inlined media and returns the raw reply text
    fn generate_content(
        &self,
        envelope: AnalysisEnvelope,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Lookup of packaged products by barcode
pub trait ProductLookup: Send + Sync {
    fn lookup(
        &self,
        barcode: String,
    ) -> impl Future<Output = Result<ProductAttributes, CoreError>> + Send;
}

/// Service trait for the analysis pipeline
pub trait AnalysisService: Send + Sync {
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<CanonicalVerdict, CoreError>> + Send;

    fn analyze_barcode(
        &self,
        input: AnalyzeBarcodeInput,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<BarcodeVerdict, CoreError>> + Send;

    fn scan_barcode(
        &self,
        input: ScanBarcodeInput,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<BarcodeVerdict, CoreError>> + Send;

    fn compare_products(
        &self,
        input: CompareProductsInput,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<CanonicalComparison, CoreError>> + Send;
}
