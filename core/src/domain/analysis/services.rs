use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::domain::{
    analysis::{
        entities::{
            AnalysisKind, AnalysisRequest, BarcodeVerdict, CanonicalComparison, CanonicalVerdict,
            ProductDetails,
        },
        normalizer::{RawModelReply, normalize_comparison, normalize_verdict},
        ports::{AnalysisService, LLMClient, ProductLookup},
        prompt::{AnalysisEnvelope, assemble},
        value_objects::{
            AnalyzeBarcodeInput, AnalyzeLabelInput, COMPARE_CARDINALITY_MESSAGE,
            CompareProductsInput, SINGLE_CARDINALITY_MESSAGE, ScanBarcodeInput,
        },
    },
    common::{entities::app_errors::CoreError, services::Service},
    media::{ports::MediaStore, services::stage_batch},
};

impl<LLM, PL, MS> Service<LLM, PL, MS>
where
    LLM: LLMClient,
    PL: ProductLookup,
    MS: MediaStore,
{
    /// The single suspend point of a request. Races the model call against
    /// cancellation; never retries.
    async fn invoke(
        &self,
        envelope: AnalysisEnvelope,
        cancel: &CancellationToken,
    ) -> Result<String, CoreError> {
        let kind = envelope.kind;
        let media_count = envelope.media.len();
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CoreError::Cancelled),
            reply = self.llm_client.generate_content(envelope) => reply,
        };

        info!(
            kind = kind.as_str(),
            media_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = outcome.is_ok(),
            "Model invocation finished"
        );

        outcome
    }

    async fn analyze_product(
        &self,
        request: AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<CanonicalVerdict, CoreError> {
        request.validate()?;
        let kind = request.kind();

        let raw = self.invoke(assemble(request), cancel).await?;
        let reply = parse_reply(kind, &raw)?;

        Ok(normalize_verdict(&reply))
    }
}

fn parse_reply(kind: AnalysisKind, raw: &str) -> Result<RawModelReply, CoreError> {
    RawModelReply::parse(raw).inspect_err(|e| {
        error!(
            kind = kind.as_str(),
            raw_reply = %raw,
            error = %e,
            "Model returned a malformed reply"
        );
    })
}

impl<LLM, PL, MS> AnalysisService for Service<LLM, PL, MS>
where
    LLM: LLMClient,
    PL: ProductLookup,
    MS: MediaStore,
{
    #[instrument(skip_all, fields(kind = "single-analyze", uploads = input.images.len()))]
    async fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
        cancel: CancellationToken,
    ) -> Result<CanonicalVerdict, CoreError> {
        let lease = stage_batch(&self.media_store, input.images)
            .await?
            .require(0..=1, SINGLE_CARDINALITY_MESSAGE)?;

        let image = lease.payloads().await?.into_iter().next();
        let request = AnalysisRequest::SingleAnalyze {
            user_goals: input.user_goals,
            image,
        };
        request.validate()?;

        let raw = self.invoke(assemble(request), &cancel).await;
        lease.release();

        let reply = parse_reply(AnalysisKind::SingleAnalyze, &raw?)?;
        Ok(normalize_verdict(&reply))
    }

    #[instrument(skip_all, fields(kind = "barcode-analyze", product = %input.product.product_name))]
    async fn analyze_barcode(
        &self,
        input: AnalyzeBarcodeInput,
        cancel: CancellationToken,
    ) -> Result<BarcodeVerdict, CoreError> {
        let product_details = ProductDetails::from(&input.product);
        let request = AnalysisRequest::BarcodeAnalyze {
            user_goals: input.user_goals,
            product: input.product,
        };

        let verdict = self.analyze_product(request, &cancel).await?;

        Ok(BarcodeVerdict {
            product_details,
            verdict,
        })
    }

    #[instrument(skip_all, fields(kind = "barcode-analyze", barcode = %input.barcode))]
    async fn scan_barcode(
        &self,
        input: ScanBarcodeInput,
        cancel: CancellationToken,
    ) -> Result<BarcodeVerdict, CoreError> {
        input.validate()?;

        let product = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CoreError::Cancelled),
            product = self.product_lookup.lookup(input.barcode.trim().to_string()) => product,
        }?;

        info!(product = %product.product_name, "Product found for barcode");

        self.analyze_barcode(
            AnalyzeBarcodeInput {
                user_goals: input.user_goals,
                product,
            },
            cancel,
        )
        .await
    }

    #[instrument(skip_all, fields(kind = "compare", uploads = input.images.len()))]
    async fn compare_products(
        &self,
        input: CompareProductsInput,
        cancel: CancellationToken,
    ) -> Result<CanonicalComparison, CoreError> {
        let lease = stage_batch(&self.media_store, input.images)
            .await?
            .require(2..=2, COMPARE_CARDINALITY_MESSAGE)?;

        let mut payloads = lease.payloads().await?.into_iter();
        let (Some(image_a), Some(image_b)) = (payloads.next(), payloads.next()) else {
            return Err(CoreError::ValidationFailed(
                COMPARE_CARDINALITY_MESSAGE.to_string(),
            ));
        };

        let request = AnalysisRequest::Compare {
            user_goals: input.user_goals,
            image_a,
            image_b,
        };
        request.validate()?;

        let raw = self.invoke(assemble(request), &cancel).await;
        lease.release();

        let reply = parse_reply(AnalysisKind::Compare, &raw?)?;
        Ok(normalize_comparison(&reply))
    }
}
