use crate::domain::{
    common::goals_or_default,
    media::entities::MediaPayload,
};

use super::entities::{AnalysisKind, AnalysisRequest, Nutriments, ProductAttributes};

const VERDICT_REPLY_FORMAT: &str = r#"Reply with ONLY a JSON object, no markdown fences and no text around it, using exactly these fields:
{
  "brief_summary": "2-3 sentences on the net impact of this food, benefits first.",
  "green_flags": ["✅ <Ingredient or fact>: <20-30 word detail>"],
  "red_flags": ["🚩 <Ingredient or fact>: <20-30 word detail>"],
  "shock_comparison": "<at most 5 words comparing to a familiar junk food, or []>",
  "better_alternative": ["<general dietary category>", "<specific branded product>"],
  "pro_tip": "💡 <10-15 words suggesting a pairing or habit>",
  "confidence_score": <integer 0-100>,
  "final_verdict": [{ "is_good": <true|false> }, "<🔴 NO | 🟡 CAUTION | 🟢 YES> - <1-2 line recommendation>"]
}
Rules:
- Use exactly [] for any field or list with no data.
- Give at most 4 green flags and at most 4 red flags, each 20-30 words.
- Only fill shock_comparison for products you judge 🔴 NO.
- Tone: simple, non-technical and encouraging. Never mention missing data."#;

const VERDICT_RUBRIC: &str = r#"Verdict rubric:
- 🟢 YES: fundamentally nutritious, even with moderate sugar or sodium.
- 🟡 CAUTION: only for a direct conflict with the user's condition or a severe macro imbalance.
- 🔴 NO: junk food, candy, or anything working against the user's goals.
Weigh major benefits above minor additives; treat small drawbacks as notes."#;

const SINGLE_ANALYZE_TEMPLATE: &str = r#"You are a food label copilot. Judge the packaged product shown in the attached label photo against the user's goals.

User goals: {user_goals}

{rubric}

{reply_format}"#;

const TEXT_ANALYZE_TEMPLATE: &str = r#"You are a food label copilot. No photo was provided: the user's text below names the product or lists its ingredients. Judge it against any goals it mentions, otherwise against general healthy eating.

User text: {user_goals}

{rubric}

{reply_format}"#;

const BARCODE_ANALYZE_TEMPLATE: &str = r#"You are a food label copilot working from barcode scanner data. The product record below comes from a public database and may be sparse; use general knowledge to fill gaps without warning about missing data.

{rubric}

{reply_format}"#;

const COMPARE_TEMPLATE: &str = r#"You are a food comparison engine. Two product labels are attached: the first image is Product A, the second is Product B. Decide which better fits the user's profile.

User goals: {user_goals}

Rules:
- Give each product a 1-3 word nickname ("vibe_check") describing its main nutritional impact.
- Score each product 1-10 for fit; a strict allergy conflict scores 0.
- Refer to the products only as "Product A" and "Product B"; never guess brand names.
- Provide exactly 3 short pros and 3 short cons per product.
- The final verdict line has no emojis, colour words, status words or product names.

Reply with ONLY a JSON object, no markdown fences and no text around it, using exactly these fields:
{
  "battle_intro": "<1-2 sentence hook>",
  "product_a": {
    "vibe_check": "<1-3 words>",
    "health_score": <integer 1-10>,
    "pros": ["✅ <benefit>", "✅ <benefit>", "✅ <benefit>"],
    "cons": ["🚩 <risk>", "🚩 <risk>", "🚩 <risk>"]
  },
  "product_b": {
    "vibe_check": "<1-3 words>",
    "health_score": <integer 1-10>,
    "pros": ["✅ <benefit>", "✅ <benefit>", "✅ <benefit>"],
    "cons": ["🚩 <risk>", "🚩 <risk>", "🚩 <risk>"]
  },
  "the_trade_off": "<if you choose Product A you get X but lose Y>",
  "hero_ingredient": "<best ingredient of the winning product, or []>",
  "pro_tip": "💡 <10-15 words suggesting a pairing or habit>",
  "final_recommendation": [{ "winner": "<Product A | Product B | Neither>" }, "<one-line verdict>"]
}"#;

/// Instructions plus inlined media, ready for the model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisEnvelope {
    pub kind: AnalysisKind,
    pub instructions: String,
    /// In caller order; for comparisons index 0 is Product A.
    pub media: Vec<MediaPayload>,
}

fn render(template: &str, user_goals: &str) -> String {
    template
        .replace("{rubric}", VERDICT_RUBRIC)
        .replace("{reply_format}", VERDICT_REPLY_FORMAT)
        .replace("{user_goals}", user_goals)
}

fn format_nutrient(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(amount) => format!("{}{}", amount, unit),
        None => "N/A".to_string(),
    }
}

fn product_context(product: &ProductAttributes) -> String {
    let ingredients = product
        .ingredients_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or("Not available");
    let Nutriments {
        sugars_100g,
        salt_100g,
        proteins_100g,
        fat_100g,
        energy_kcal_100g,
    } = &product.nutriments;

    format!(
        "Product Name: {}\nIngredients: {}\nNutritional Values (per 100g):\n- Sugar: {}\n- Salt: {}\n- Protein: {}\n- Fat: {}\n- Energy: {}",
        product.product_name.trim(),
        ingredients,
        format_nutrient(*sugars_100g, "g"),
        format_nutrient(*salt_100g, "g"),
        format_nutrient(*proteins_100g, "g"),
        format_nutrient(*fat_100g, "g"),
        format_nutrient(*energy_kcal_100g, " kcal"),
    )
}

/// Builds the request envelope. Deterministic: the same request always
/// yields the same instructions and media order.
pub fn assemble(request: AnalysisRequest) -> AnalysisEnvelope {
    let kind = request.kind();

    match request {
        AnalysisRequest::SingleAnalyze {
            user_goals,
            image: Some(image),
        } => AnalysisEnvelope {
            kind,
            instructions: render(SINGLE_ANALYZE_TEMPLATE, goals_or_default(&user_goals)),
            media: vec![image],
        },
        AnalysisRequest::SingleAnalyze {
            user_goals,
            image: None,
        } => AnalysisEnvelope {
            kind,
            instructions: render(TEXT_ANALYZE_TEMPLATE, user_goals.trim()),
            media: Vec::new(),
        },
        AnalysisRequest::BarcodeAnalyze {
            user_goals,
            product,
        } => {
            let user_context = format!(
                "User Goals / Allergies: \"{}\"",
                goals_or_default(&user_goals)
            );
            let instructions = format!(
                "{}\n\n{}\n\n{}",
                render(BARCODE_ANALYZE_TEMPLATE, goals_or_default(&user_goals)),
                user_context,
                product_context(&product)
            );
            AnalysisEnvelope {
                kind,
                instructions,
                media: Vec::new(),
            }
        }
        AnalysisRequest::Compare {
            user_goals,
            image_a,
            image_b,
        } => AnalysisEnvelope {
            kind,
            instructions: render(COMPARE_TEMPLATE, goals_or_default(&user_goals)),
            media: vec![image_a, image_b],
        },
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn image(tag: &'static [u8]) -> MediaPayload {
        MediaPayload {
            mime_type: "image/jpeg".to_string(),
            data: Bytes::from_static(tag),
        }
    }

    fn product() -> ProductAttributes {
        ProductAttributes {
            product_name: "Crunchy Oats".to_string(),
            ingredients_text: None,
            nutriments: Nutriments {
                sugars_100g: Some(12.5),
                salt_100g: Some(0.0),
                ..Nutriments::default()
            },
            image_url: None,
        }
    }

    #[test]
    fn test_single_envelope_carries_goals_and_image() {
        let envelope = assemble(AnalysisRequest::SingleAnalyze {
            user_goals: "Diabetic, nut allergy".to_string(),
            image: Some(image(b"label")),
        });

        assert_eq!(envelope.kind, AnalysisKind::SingleAnalyze);
        assert!(envelope.instructions.contains("User goals: Diabetic, nut allergy"));
        assert_eq!(envelope.media.len(), 1);
        for field in [
            "brief_summary",
            "green_flags",
            "red_flags",
            "shock_comparison",
            "better_alternative",
            "pro_tip",
            "confidence_score",
            "final_verdict",
        ] {
            assert!(envelope.instructions.contains(field), "missing {field}");
        }
        assert!(!envelope.instructions.contains("{reply_format}"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let request = AnalysisRequest::BarcodeAnalyze {
            user_goals: "High protein".to_string(),
            product: product(),
        };
        assert_eq!(assemble(request.clone()), assemble(request));
    }

    #[test]
    fn test_blank_goals_use_default() {
        let envelope = assemble(AnalysisRequest::SingleAnalyze {
            user_goals: "  ".to_string(),
            image: Some(image(b"label")),
        });
        assert!(envelope.instructions.contains("User goals: General healthy eating"));
    }

    #[test]
    fn test_text_only_envelope_has_no_media() {
        let envelope = assemble(AnalysisRequest::SingleAnalyze {
            user_goals: "Ingredients: sugar, palm oil, cocoa".to_string(),
            image: None,
        });
        assert!(envelope.media.is_empty());
        assert!(envelope.instructions.contains("User text: Ingredients: sugar, palm oil, cocoa"));
    }

    #[test]
    fn test_barcode_context_defaults() {
        let envelope = assemble(AnalysisRequest::BarcodeAnalyze {
            user_goals: String::new(),
            product: product(),
        });

        let text = &envelope.instructions;
        assert!(envelope.media.is_empty());
        assert!(text.contains("User Goals / Allergies: \"General healthy eating\""));
        assert!(text.contains("Product Name: Crunchy Oats"));
        assert!(text.contains("Ingredients: Not available"));
        assert!(text.contains("- Sugar: 12.5g"));
        assert!(text.contains("- Salt: 0g"));
        assert!(text.contains("- Protein: N/A"));
        assert!(text.contains("- Fat: N/A"));
        assert!(text.contains("- Energy: N/A"));
    }

    #[test]
    fn test_compare_preserves_caller_order() {
        let envelope = assemble(AnalysisRequest::Compare {
            user_goals: "Weight loss".to_string(),
            image_a: image(b"first"),
            image_b: image(b"second"),
        });

        assert_eq!(envelope.media[0].data, Bytes::from_static(b"first"));
        assert_eq!(envelope.media[1].data, Bytes::from_static(b"second"));
        assert!(envelope.instructions.contains("final_recommendation"));
    }
}
