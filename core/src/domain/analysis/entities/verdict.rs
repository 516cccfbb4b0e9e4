use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::product::ProductDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Safe,
    Caution,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlagPolarity {
    Supportive,
    Risk,
}

/// A single labeled observation pulled out of the model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flag {
    pub label: String,
    pub detail: String,
    pub polarity: FlagPolarity,
}

/// Normalized, UI-safe verdict for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalVerdict {
    pub summary: String,
    pub status: VerdictStatus,
    pub verdict_message: String,
    /// Always within 0..=100.
    pub confidence: u8,
    /// Risk flags first, then supportive ones.
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shock_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_tip: Option<String>,
}

impl CanonicalVerdict {
    pub fn risk_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags
            .iter()
            .filter(|flag| flag.polarity == FlagPolarity::Risk)
    }

    pub fn supportive_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags
            .iter()
            .filter(|flag| flag.polarity == FlagPolarity::Supportive)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BarcodeVerdict {
    pub product_details: ProductDetails,
    pub verdict: CanonicalVerdict,
}
