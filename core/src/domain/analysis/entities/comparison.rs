use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    ProductA,
    ProductB,
    Neither,
    Tie,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductScorecard {
    pub vibe: String,
    /// Always within 0..=10.
    pub score: u8,
    /// At most three entries.
    pub pros: Vec<String>,
    /// At most three entries.
    pub cons: Vec<String>,
}

/// Scorecards keyed by upload position: `product_a` is always the first
/// uploaded image, whatever the scores say.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductPair {
    pub product_a: ProductScorecard,
    pub product_b: ProductScorecard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalComparison {
    pub battle_intro: String,
    pub products: ProductPair,
    pub winner: Winner,
    pub winner_statement: String,
    pub trade_off: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_ingredient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_tip: Option<String>,
}
