pub mod llm;
pub mod media;
pub mod product_lookup;
