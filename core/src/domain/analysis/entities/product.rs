use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Attributes of a packaged product as returned by the product lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductAttributes {
    pub product_name: String,
    pub ingredients_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutriments: Nutriments,
    pub image_url: Option<String>,
}

/// Per-100g nutrient values. Lookups report these as numbers or numeric
/// strings; anything else is treated as unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "RawNutriments")]
pub struct Nutriments {
    pub sugars_100g: Option<f64>,
    pub salt_100g: Option<f64>,
    pub proteins_100g: Option<f64>,
    pub fat_100g: Option<f64>,
    #[serde(rename = "energy-kcal_100g")]
    pub energy_kcal_100g: Option<f64>,
}

/// Wire form of [`Nutriments`]. Energy shows up under either spelling, and
/// some sources send both.
#[derive(Deserialize)]
struct RawNutriments {
    #[serde(default, deserialize_with = "lenient_number")]
    sugars_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    salt_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    proteins_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    fat_100g: Option<f64>,
    #[serde(default, rename = "energy-kcal_100g", deserialize_with = "lenient_number")]
    energy_kcal_dashed: Option<f64>,
    #[serde(default, rename = "energy_kcal_100g", deserialize_with = "lenient_number")]
    energy_kcal_underscored: Option<f64>,
}

impl From<RawNutriments> for Nutriments {
    fn from(raw: RawNutriments) -> Self {
        Self {
            sugars_100g: raw.sugars_100g,
            salt_100g: raw.salt_100g,
            proteins_100g: raw.proteins_100g,
            fat_100g: raw.fat_100g,
            energy_kcal_100g: raw.energy_kcal_dashed.or(raw.energy_kcal_underscored),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|n| n.is_finite()))
}

/// Reads an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Product facts echoed back next to a barcode verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    pub name: String,
    pub image: Option<String>,
    pub ingredients: Option<String>,
}

impl From<&ProductAttributes> for ProductDetails {
    fn from(product: &ProductAttributes) -> Self {
        Self {
            name: product.product_name.clone(),
            image: product.image_url.clone(),
            ingredients: product.ingredients_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nutriments_accept_numeric_strings_and_dash_key() {
        let nutriments: Nutriments = serde_json::from_value(json!({
            "sugars_100g": "12.5",
            "salt_100g": 0.8,
            "proteins_100g": "n/a",
            "energy-kcal_100g": 410,
            "fiber_100g": 3
        }))
        .unwrap();

        assert_eq!(nutriments.sugars_100g, Some(12.5));
        assert_eq!(nutriments.salt_100g, Some(0.8));
        assert_eq!(nutriments.proteins_100g, None);
        assert_eq!(nutriments.fat_100g, None);
        assert_eq!(nutriments.energy_kcal_100g, Some(410.0));
    }

    #[test]
    fn test_nutriments_accept_underscore_energy_alias() {
        let nutriments: Nutriments =
            serde_json::from_value(json!({ "energy_kcal_100g": "250" })).unwrap();
        assert_eq!(nutriments.energy_kcal_100g, Some(250.0));
    }

    #[test]
    fn test_nutriments_with_both_energy_spellings_prefer_dashed_key() {
        let nutriments: Nutriments = serde_json::from_value(json!({
            "energy-kcal_100g": 410,
            "energy_kcal_100g": "400",
            "salt_100g": 1.1
        }))
        .unwrap();

        assert_eq!(nutriments.energy_kcal_100g, Some(410.0));
        assert_eq!(nutriments.salt_100g, Some(1.1));
    }

    #[test]
    fn test_null_nutriments_are_treated_as_unknown() {
        let product: ProductAttributes = serde_json::from_value(json!({
            "product_name": "Biscuits",
            "ingredients_text": null,
            "nutriments": null,
            "image_url": null
        }))
        .unwrap();

        assert_eq!(product.product_name, "Biscuits");
        assert_eq!(product.nutriments, Nutriments::default());
    }

    #[test]
    fn test_nutriments_serialize_with_dashed_energy_key() {
        let nutriments = Nutriments {
            energy_kcal_100g: Some(250.0),
            ..Nutriments::default()
        };

        let value = serde_json::to_value(&nutriments).unwrap();

        assert_eq!(value["energy-kcal_100g"], json!(250.0));
        assert!(value.get("energy_kcal_100g").is_none());
    }
}
