use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use nutriscan_core::domain::{
    analysis::{
        entities::{AnalysisKind, Nutriments, ProductAttributes, VerdictStatus, Winner},
        ports::{AnalysisService, LLMClient, ProductLookup},
        prompt::AnalysisEnvelope,
        value_objects::{
            AnalyzeBarcodeInput, AnalyzeLabelInput, COMPARE_CARDINALITY_MESSAGE,
            CompareProductsInput, ScanBarcodeInput,
        },
    },
    common::{entities::app_errors::CoreError, services::Service},
    media::{
        entities::{MediaPayload, ReleaseOutcome, StagedMedia},
        ports::MediaStore,
        value_objects::MediaUpload,
    },
};

#[derive(Default)]
struct StoreState {
    files: HashMap<String, Bytes>,
    staged: usize,
    released: Vec<String>,
}

#[derive(Clone, Default)]
struct RecordingStore {
    state: Arc<Mutex<StoreState>>,
}

impl RecordingStore {
    fn staged(&self) -> usize {
        self.state.lock().unwrap().staged
    }

    fn released(&self) -> usize {
        self.state.lock().unwrap().released.len()
    }

    fn remaining(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

impl MediaStore for RecordingStore {
    async fn stage(&self, upload: MediaUpload) -> Result<StagedMedia, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.staged += 1;
        let id = uuid::Uuid::new_v4();
        let key = id.to_string();
        state.files.insert(key.clone(), upload.data.clone());

        Ok(StagedMedia {
            id,
            key,
            mime_type: upload.mime_type,
            size_bytes: upload.data.len(),
        })
    }

    async fn read(&self, media: &StagedMedia) -> Result<MediaPayload, CoreError> {
        let state = self.state.lock().unwrap();
        let data = state
            .files
            .get(&media.key)
            .cloned()
            .ok_or_else(|| CoreError::MediaStorage("missing".to_string()))?;

        Ok(MediaPayload {
            mime_type: media.mime_type.clone(),
            data,
        })
    }

    fn release(&self, media: &StagedMedia) -> Result<ReleaseOutcome, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.released.push(media.key.clone());
        Ok(match state.files.remove(&media.key) {
            Some(_) => ReleaseOutcome::Deleted,
            None => ReleaseOutcome::AlreadyGone,
        })
    }
}

#[derive(Clone)]
enum Behaviour {
    Reply(String),
    Fail,
    Hang,
}

#[derive(Clone)]
struct FakeLLM {
    behaviour: Behaviour,
    seen: Arc<Mutex<Vec<(AnalysisKind, String, Vec<Bytes>)>>>,
}

impl FakeLLM {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            seen: Arc::default(),
        }
    }

    fn replying(value: serde_json::Value) -> Self {
        Self::new(Behaviour::Reply(value.to_string()))
    }

    fn calls(&self) -> Vec<(AnalysisKind, String, Vec<Bytes>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl LLMClient for FakeLLM {
    async fn generate_content(&self, envelope: AnalysisEnvelope) -> Result<String, CoreError> {
        self.seen.lock().unwrap().push((
            envelope.kind,
            envelope.instructions,
            envelope.media.into_iter().map(|m| m.data).collect(),
        ));

        match &self.behaviour {
            Behaviour::Reply(raw) => Ok(raw.clone()),
            Behaviour::Fail => Err(CoreError::CollaboratorUnavailable(
                "connection refused".to_string(),
            )),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

#[derive(Clone, Default)]
struct StaticLookup {
    product: Option<ProductAttributes>,
}

impl ProductLookup for StaticLookup {
    async fn lookup(&self, barcode: String) -> Result<ProductAttributes, CoreError> {
        self.product
            .clone()
            .ok_or(CoreError::ProductNotFound(barcode))
    }
}

fn image(bytes: &'static [u8]) -> MediaUpload {
    MediaUpload::new(Some("label.jpg".to_string()), "image/jpeg", Bytes::from_static(bytes))
}

fn oats() -> ProductAttributes {
    ProductAttributes {
        product_name: "Masala Oats".to_string(),
        ingredients_text: Some("Oats, salt, spices".to_string()),
        nutriments: Nutriments {
            sugars_100g: Some(2.0),
            salt_100g: Some(1.4),
            ..Default::default()
        },
        image_url: Some("https://images.example/oats.jpg".to_string()),
    }
}

fn service(
    llm: FakeLLM,
    lookup: StaticLookup,
    store: RecordingStore,
) -> Service<FakeLLM, StaticLookup, RecordingStore> {
    Service::new(llm, lookup, store)
}

fn verdict_reply() -> serde_json::Value {
    json!({
        "brief_summary": ["Mostly refined flour with added sugar."],
        "red_flags": ["🍬 High Sugar: 22g per 100g", "Maida"],
        "green_flags": ["🌾 Fibre: Some whole grain"],
        "final_verdict": [{ "is_good": true }, "🟡 Caution: Fine as an occasional treat"],
        "confidence_score": "140",
        "shock_comparison": "None",
        "better_alternative": ["Plain oats", "Rolled oats with fruit"],
        "pro_tip": ["💡 Pair it with protein"]
    })
}

#[tokio::test]
async fn test_single_analyze_normalizes_and_releases_once() {
    let store = RecordingStore::default();
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(llm.clone(), StaticLookup::default(), store.clone());

    let verdict = service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: "diabetic".to_string(),
                images: vec![image(b"label")],
            },
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(verdict.status, VerdictStatus::Caution);
    assert_eq!(verdict.confidence, 100);
    assert_eq!(verdict.summary, "Mostly refined flour with added sugar.");
    assert_eq!(verdict.flags.len(), 3);
    assert_eq!(verdict.flags[0].label, "High Sugar");
    assert_eq!(verdict.flags[1].label, "Maida");
    assert_eq!(verdict.shock_comparison, None);
    assert_eq!(verdict.alternative_category.as_deref(), Some("Plain oats"));
    assert_eq!(verdict.alternative_product.as_deref(), Some("Rolled oats with fruit"));
    assert_eq!(verdict.pro_tip.as_deref(), Some("Pair it with protein"));

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, AnalysisKind::SingleAnalyze);
    assert!(calls[0].1.contains("diabetic"));
    assert_eq!(calls[0].2, vec![Bytes::from_static(b"label")]);

    assert_eq!(store.staged(), 1);
    assert_eq!(store.released(), 1);
    assert_eq!(store.remaining(), 0);
}

#[tokio::test]
async fn test_text_only_analysis_sends_no_media() {
    let store = RecordingStore::default();
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(llm.clone(), StaticLookup::default(), store.clone());

    service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: "Maggi noodles, I am lactose intolerant".to_string(),
                images: Vec::new(),
            },
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let calls = llm.calls();
    assert!(calls[0].2.is_empty());
    assert!(calls[0].1.contains("Maggi noodles"));
    assert_eq!(store.staged(), 0);
}

#[tokio::test]
async fn test_empty_request_is_rejected() {
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(llm.clone(), StaticLookup::default(), RecordingStore::default());

    let result = service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: "  ".to_string(),
                images: Vec::new(),
            },
            CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::ValidationFailed(_))));
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn test_collaborator_failure_still_releases() {
    let store = RecordingStore::default();
    let service = service(
        FakeLLM::new(Behaviour::Fail),
        StaticLookup::default(),
        store.clone(),
    );

    let result = service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: String::new(),
                images: vec![image(b"label")],
            },
            CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::CollaboratorUnavailable(_))));
    assert_eq!(store.released(), 1);
    assert_eq!(store.remaining(), 0);
}

#[tokio::test]
async fn test_malformed_reply_is_an_error_and_releases() {
    let store = RecordingStore::default();
    let service = service(
        FakeLLM::new(Behaviour::Reply("Sorry, I cannot help with that.".to_string())),
        StaticLookup::default(),
        store.clone(),
    );

    let result = service
        .analyze_label(
            AnalyzeLabelInput {
                user_goals: String::new(),
                images: vec![image(b"label")],
            },
            CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::MalformedReply(_))));
    assert_eq!(store.released(), 1);
}

#[tokio::test]
async fn test_non_image_upload_is_rejected_before_the_model() {
    let store = RecordingStore::default();
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(llm.clone(), StaticLookup::default(), store.clone());

    let result = service
        .compare_products(
            CompareProductsInput {
                user_goals: String::new(),
                images: vec![
                    image(b"first"),
                    MediaUpload::new(None, "application/pdf", Bytes::from_static(b"%PDF")),
                ],
            },
            CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::ValidationFailed(_))));
    assert!(llm.calls().is_empty());
    assert_eq!(store.staged(), 1);
    assert_eq!(store.released(), 1);
}

#[tokio::test]
async fn test_cancellation_reports_cancelled_and_releases() {
    let store = RecordingStore::default();
    let service = service(
        FakeLLM::new(Behaviour::Hang),
        StaticLookup::default(),
        store.clone(),
    );
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = service
        .compare_products(
            CompareProductsInput {
                user_goals: String::new(),
                images: vec![image(b"A"), image(b"B")],
            },
            cancel,
        )
        .await;

    assert_eq!(result, Err(CoreError::Cancelled));
    assert_eq!(store.released(), 2);
    assert_eq!(store.remaining(), 0);
}

#[tokio::test]
async fn test_compare_keeps_upload_order() {
    let store = RecordingStore::default();
    let llm = FakeLLM::replying(json!({
        "battle_intro": "Chips vs. makhana.",
        "product_a": {
            "vibe_check": "Salty crunch",
            "health_score": 3,
            "pros": ["Tasty"],
            "cons": ["Palm oil", "Salt", "Additives", "Sugar"]
        },
        "product_b": {
            "vibe_check": "Light and roasted",
            "health_score": "8",
            "pros": ["Protein", "Low fat"],
            "cons": []
        },
        "final_recommendation": [{ "winner": "Product B" }, "Makhana wins on every axis."],
        "the_trade_off": "You lose some crunch.",
        "hero_ingredient": "Fox nuts"
    }));
    let service = service(llm.clone(), StaticLookup::default(), store.clone());

    let comparison = service
        .compare_products(
            CompareProductsInput {
                user_goals: "weight loss".to_string(),
                images: vec![image(b"chips"), image(b"makhana")],
            },
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(comparison.winner, Winner::ProductB);
    assert_eq!(comparison.products.product_a.vibe, "Salty crunch");
    assert_eq!(comparison.products.product_a.cons.len(), 3);
    assert_eq!(comparison.products.product_b.score, 8);
    assert_eq!(comparison.pro_tip, None);

    let calls = llm.calls();
    assert_eq!(
        calls[0].2,
        vec![Bytes::from_static(b"chips"), Bytes::from_static(b"makhana")]
    );
    assert_eq!(store.released(), 2);
}

#[tokio::test]
async fn test_compare_with_one_image_is_rejected() {
    let store = RecordingStore::default();
    let llm = FakeLLM::replying(json!({}));
    let service = service(llm.clone(), StaticLookup::default(), store.clone());

    let result = service
        .compare_products(
            CompareProductsInput {
                user_goals: String::new(),
                images: vec![image(b"only")],
            },
            CancellationToken::new(),
        )
        .await;

    assert_eq!(
        result,
        Err(CoreError::ValidationFailed(
            COMPARE_CARDINALITY_MESSAGE.to_string()
        ))
    );
    assert!(llm.calls().is_empty());
    assert_eq!(store.released(), 1);
    assert_eq!(store.remaining(), 0);
}

#[tokio::test]
async fn test_barcode_analysis_echoes_product_details() {
    let llm = FakeLLM::replying(json!({
        "brief_summary": "Salty but filling.",
        "final_verdict": [{ "is_good": false }, "🔴 Limit: Too much salt for daily use"],
        "confidence_score": 72
    }));
    let service = service(llm.clone(), StaticLookup::default(), RecordingStore::default());

    let result = service
        .analyze_barcode(
            AnalyzeBarcodeInput {
                user_goals: "low sodium".to_string(),
                product: oats(),
            },
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.product_details.name, "Masala Oats");
    assert_eq!(
        result.product_details.image.as_deref(),
        Some("https://images.example/oats.jpg")
    );
    assert_eq!(result.verdict.status, VerdictStatus::Avoid);
    assert_eq!(result.verdict.confidence, 72);
    assert!(result.verdict.flags.is_empty());

    let calls = llm.calls();
    assert_eq!(calls[0].0, AnalysisKind::BarcodeAnalyze);
    assert!(calls[0].1.contains("Masala Oats"));
    assert!(calls[0].1.contains("low sodium"));
    assert!(calls[0].2.is_empty());
}

#[tokio::test]
async fn test_scan_barcode_looks_up_then_analyzes() {
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(
        llm.clone(),
        StaticLookup {
            product: Some(oats()),
        },
        RecordingStore::default(),
    );

    let result = service
        .scan_barcode(
            ScanBarcodeInput {
                user_goals: String::new(),
                barcode: " 8901058851298 ".to_string(),
            },
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.product_details.name, "Masala Oats");
    assert_eq!(llm.calls().len(), 1);
}

#[tokio::test]
async fn test_scan_unknown_barcode_never_calls_the_model() {
    let llm = FakeLLM::replying(verdict_reply());
    let service = service(llm.clone(), StaticLookup::default(), RecordingStore::default());

    let result = service
        .scan_barcode(
            ScanBarcodeInput {
                user_goals: String::new(),
                barcode: "0000000000000".to_string(),
            },
            CancellationToken::new(),
        )
        .await;

    assert_eq!(
        result,
        Err(CoreError::ProductNotFound("0000000000000".to_string()))
    );
    assert!(llm.calls().is_empty());
}
