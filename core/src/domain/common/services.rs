use crate::domain::{
    analysis::ports::{LLMClient, ProductLookup},
    media::ports::MediaStore,
};

#[derive(Clone)]
pub struct Service<LLM, PL, MS>
where
    LLM: LLMClient,
    PL: ProductLookup,
    MS: MediaStore,
{
    pub(crate) llm_client: LLM,
    pub(crate) product_lookup: PL,
    pub(crate) media_store: MS,
}

impl<LLM, PL, MS> Service<LLM, PL, MS>
where
    LLM: LLMClient,
    PL: ProductLookup,
    MS: MediaStore,
{
    pub fn new(llm_client: LLM, product_lookup: PL, media_store: MS) -> Self {
        Self {
            llm_client,
            product_lookup,
            media_store,
        }
    }
}
