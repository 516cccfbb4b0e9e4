use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{
    analysis::{
        entities::{Nutriments, ProductAttributes, null_as_default},
        ports::ProductLookup,
    },
    common::{ProductLookupConfig, entities::app_errors::CoreError},
};

const USER_AGENT: &str = concat!("nutriscan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    ingredients_text: Option<String>,
    image_front_url: Option<String>,
    image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    nutriments: Nutriments,
}

impl OpenFoodFactsClient {
    pub fn new(config: ProductLookupConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                CoreError::CollaboratorUnavailable(format!(
                    "Failed to build product lookup client: {}",
                    e
                ))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

fn into_attributes(barcode: &str, response: ProductResponse) -> Result<ProductAttributes, CoreError> {
    let product = match response.product {
        Some(product) if response.status == 1 => product,
        _ => return Err(CoreError::ProductNotFound(barcode.to_string())),
    };

    let product_name = product
        .product_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

    Ok(ProductAttributes {
        product_name,
        ingredients_text: product.ingredients_text.filter(|text| !text.trim().is_empty()),
        nutriments: product.nutriments,
        image_url: product.image_front_url.or(product.image_url),
    })
}

impl ProductLookup for OpenFoodFactsClient {
    async fn lookup(&self, barcode: String) -> Result<ProductAttributes, CoreError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Product lookup request failed: {}", e);
            CoreError::CollaboratorUnavailable(format!("Product lookup error: {}", e))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::ProductNotFound(barcode));
        }

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, barcode = %barcode, "Product lookup returned error");
            return Err(CoreError::CollaboratorUnavailable(format!(
                "Product lookup returned error: {}",
                status
            )));
        }

        let body: ProductResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse product lookup response: {}", e);
            CoreError::CollaboratorUnavailable(format!("Invalid product lookup response: {}", e))
        })?;

        into_attributes(&barcode, body)
    }
}
