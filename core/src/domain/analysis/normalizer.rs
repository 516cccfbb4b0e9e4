//! Turns the model's loosely-structured JSON reply into canonical records.
//!
//! Every historical "no data" encoding is recognised here and nowhere else:
//! callers never inspect raw JSON values themselves.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::{
    CanonicalComparison, CanonicalVerdict, Flag, FlagPolarity, ProductPair, ProductScorecard,
    VerdictStatus, Winner,
};

const MAX_CONFIDENCE: u8 = 100;
const MAX_HEALTH_SCORE: u8 = 10;
const MAX_POINTS_PER_SIDE: usize = 3;

const DEFAULT_SUMMARY: &str = "No summary available.";
const DEFAULT_WINNER_STATEMENT: &str = "Analysis complete.";

/// Literal strings the model uses to mean "nothing here", compared
/// case-insensitively after trimming.
const SENTINELS: &[&str] = &["", "[]", "none", "none found", "null", "\"\"", "''"];

const CAUTION_MARKERS: &[&str] = &["caution", "warning", "🟡", "⚠"];
const STOP_MARKERS: &[&str] = &["avoid", "limit", "🔴", "🛑", "⛔"];

static LEADING_GLYPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}]\x{FE0F}?\s*")
        .expect("leading glyph pattern is valid")
});

static NO_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bno\b").expect("no-word pattern is valid"));

/// Syntactically valid JSON object returned by the model, not yet trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawModelReply {
    fields: Map<String, Value>,
}

impl RawModelReply {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| CoreError::MalformedReply(format!("invalid JSON: {}", e)))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(CoreError::MalformedReply(format!(
                "expected a JSON object at top level, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_sentinel(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    SENTINELS.contains(&lowered.as_str())
}

/// Resolves sentinel encodings to `None`; otherwise yields the trimmed text,
/// or the first element's text for arrays.
pub fn clean_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            if is_sentinel(text) {
                None
            } else {
                Some(text.trim().to_string())
            }
        }
        Value::Array(items) => clean_text(items.first()),
        _ => None,
    }
}

/// Removes one leading emoji or symbol glyph (e.g. ✅, 🚩, 💡).
pub fn strip_glyph(text: &str) -> &str {
    let trimmed = text.trim();
    match LEADING_GLYPH.find(trimmed) {
        Some(glyph) => trimmed[glyph.end()..].trim(),
        None => trimmed,
    }
}

fn clean_point(text: &str) -> Option<String> {
    let stripped = strip_glyph(text);
    if is_sentinel(stripped) {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Parses `"🚩 Label: detail"` into a flag. Returns `None` for entries that are
/// empty once the glyph is gone, including a bare colon.
pub fn parse_point(text: &str, polarity: FlagPolarity) -> Option<Flag> {
    let point = clean_point(text)?;

    let (label, detail) = match point.split_once(':') {
        Some((label, detail)) => {
            let label = label.trim();
            let detail = detail.trim();
            if label.is_empty() && detail.is_empty() {
                return None;
            }
            let label = if label.is_empty() { "Detail" } else { label };
            let detail = if detail.is_empty() { label } else { detail };
            (label.to_string(), detail.to_string())
        }
        None => (point.clone(), point),
    };

    Some(Flag {
        label,
        detail,
        polarity,
    })
}

fn string_items(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(text)) => vec![text.as_str()],
        _ => Vec::new(),
    }
}

pub fn parse_points(value: Option<&Value>, polarity: FlagPolarity) -> Vec<Flag> {
    string_items(value)
        .into_iter()
        .filter_map(|item| parse_point(item, polarity))
        .collect()
}

fn short_points(value: Option<&Value>) -> Vec<String> {
    string_items(value)
        .into_iter()
        .filter_map(clean_point)
        .take(MAX_POINTS_PER_SIDE)
        .collect()
}

/// Coerces a score to an integer in `0..=max`. Non-numeric input yields 0.
pub fn clamp_score(value: Option<&Value>, max: u8) -> u8 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => n.round().clamp(0.0, f64::from(max)) as u8,
        _ => 0,
    }
}

fn has_stop_language(lowered: &str) -> bool {
    STOP_MARKERS.iter().any(|marker| lowered.contains(marker)) || NO_WORD.is_match(lowered)
}

/// Derives the tri-state status from the verdict text first and only then
/// from the model's boolean flag.
pub fn derive_status(verdict_message: &str, is_good: bool) -> VerdictStatus {
    let lowered = verdict_message.to_lowercase();

    if CAUTION_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        VerdictStatus::Caution
    } else if has_stop_language(&lowered) {
        VerdictStatus::Avoid
    } else if is_good {
        VerdictStatus::Safe
    } else {
        VerdictStatus::Avoid
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads `[{is_good}, "message"]`, tolerating a bare message string.
fn read_final_verdict(value: Option<&Value>) -> (bool, String) {
    match value {
        Some(Value::Array(items)) => {
            let is_good = match items.first() {
                Some(Value::Object(flag)) => flag.get("is_good").is_some_and(truthy),
                Some(other) => truthy(other),
                None => false,
            };
            let message = items
                .get(1)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            (is_good, message)
        }
        Some(Value::String(message)) => {
            let is_good = !has_stop_language(&message.to_lowercase());
            (is_good, message.trim().to_string())
        }
        _ => (false, String::new()),
    }
}

/// Splits `better_alternative` into category and specific product.
pub fn extract_alternative(value: Option<&Value>) -> (Option<String>, Option<String>) {
    match value {
        Some(Value::Array(items)) => {
            let category = clean_text(items.first());
            let product = if items.len() > 1 {
                clean_text(items.last()).or_else(|| category.clone())
            } else {
                category.clone()
            };
            match category {
                Some(category) => (Some(category), product),
                None => (product.clone(), product),
            }
        }
        Some(Value::String(_)) => {
            let cleaned = clean_text(value);
            (cleaned.clone(), cleaned)
        }
        _ => (None, None),
    }
}

fn clean_tip(value: Option<&Value>) -> Option<String> {
    clean_text(value).and_then(|tip| clean_point(&tip))
}

pub fn normalize_verdict(reply: &RawModelReply) -> CanonicalVerdict {
    let (is_good, verdict_message) = read_final_verdict(reply.field("final_verdict"));
    let (alternative_category, alternative_product) =
        extract_alternative(reply.field("better_alternative"));

    let mut flags = parse_points(reply.field("red_flags"), FlagPolarity::Risk);
    flags.extend(parse_points(
        reply.field("green_flags"),
        FlagPolarity::Supportive,
    ));

    CanonicalVerdict {
        summary: clean_text(reply.field("brief_summary"))
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        status: derive_status(&verdict_message, is_good),
        verdict_message,
        confidence: clamp_score(reply.field("confidence_score"), MAX_CONFIDENCE),
        flags,
        shock_comparison: clean_text(reply.field("shock_comparison")),
        alternative_category,
        alternative_product,
        pro_tip: clean_tip(reply.field("pro_tip")),
    }
}

fn normalize_scorecard(value: Option<&Value>) -> ProductScorecard {
    let Some(Value::Object(card)) = value else {
        return ProductScorecard::default();
    };

    ProductScorecard {
        vibe: clean_text(card.get("vibe_check")).unwrap_or_default(),
        score: clamp_score(card.get("health_score"), MAX_HEALTH_SCORE),
        pros: short_points(card.get("pros")),
        cons: short_points(card.get("cons")),
    }
}

pub fn parse_winner(label: &str) -> Winner {
    let lowered = label.trim().to_lowercase();
    let lowered = lowered.strip_prefix("product").unwrap_or(&lowered).trim();

    match lowered {
        "a" => Winner::ProductA,
        "b" => Winner::ProductB,
        "neither" | "none" => Winner::Neither,
        _ => Winner::Tie,
    }
}

/// Reads `[{winner}, "message"]`.
fn read_final_recommendation(value: Option<&Value>) -> (Winner, Option<String>) {
    let Some(Value::Array(items)) = value else {
        return (Winner::Tie, None);
    };

    let winner = match items.first() {
        Some(Value::Object(choice)) => choice.get("winner").and_then(Value::as_str),
        Some(Value::String(label)) => Some(label.as_str()),
        _ => None,
    }
    .map(parse_winner)
    .unwrap_or(Winner::Tie);

    (winner, clean_text(items.get(1)))
}

pub fn normalize_comparison(reply: &RawModelReply) -> CanonicalComparison {
    let (winner, winner_statement) = read_final_recommendation(reply.field("final_recommendation"));

    CanonicalComparison {
        battle_intro: clean_text(reply.field("battle_intro")).unwrap_or_default(),
        products: ProductPair {
            product_a: normalize_scorecard(reply.field("product_a")),
            product_b: normalize_scorecard(reply.field("product_b")),
        },
        winner,
        winner_statement: winner_statement
            .unwrap_or_else(|| DEFAULT_WINNER_STATEMENT.to_string()),
        trade_off: clean_text(reply.field("the_trade_off")).unwrap_or_default(),
        hero_ingredient: clean_text(reply.field("hero_ingredient")),
        pro_tip: clean_tip(reply.field("pro_tip")),
    }
}
