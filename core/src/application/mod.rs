use crate::{
    domain::common::{NutriscanConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        llm::gemini_client::GeminiLLMClient, media::local_disk::LocalDiskMediaStore,
        product_lookup::open_food_facts::OpenFoodFactsClient,
    },
};

pub type NutriscanService = Service<GeminiLLMClient, OpenFoodFactsClient, LocalDiskMediaStore>;

pub async fn create_service(config: NutriscanConfig) -> Result<NutriscanService, CoreError> {
    let llm_client = GeminiLLMClient::new(config.llm)?;
    let product_lookup = OpenFoodFactsClient::new(config.product_lookup)?;
    let media_store = LocalDiskMediaStore::new(config.media).await?;

    Ok(Service::new(llm_client, product_lookup, media_store))
}
