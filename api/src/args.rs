use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use nutriscan_core::domain::common::{
    LLMConfig, MediaConfig, NutriscanConfig, ProductLookupConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriscan", version, about = "Food label health verdicts")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub product_lookup: ProductLookupArgs,

    #[command(flatten)]
    pub media: MediaArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "port", env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Prefix for every route, e.g. `/nutriscan`
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "max-image-bytes", env = "MAX_IMAGE_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,

    #[arg(id = "llm_timeout_secs", long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ProductLookupArgs {
    #[arg(
        long = "product-lookup-url",
        env = "PRODUCT_LOOKUP_URL",
        default_value = "https://world.openfoodfacts.org"
    )]
    pub url: String,

    #[arg(
        id = "product_lookup_timeout_secs",
        long = "product-lookup-timeout-secs",
        env = "PRODUCT_LOOKUP_TIMEOUT_SECS",
        default_value_t = 10
    )]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct MediaArgs {
    #[arg(long = "upload-dir", env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// `tracing_subscriber::EnvFilter` directives
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for NutriscanConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            product_lookup: ProductLookupConfig {
                base_url: args.product_lookup.url,
                request_timeout: Duration::from_secs(args.product_lookup.timeout_secs),
            },
            media: MediaConfig {
                upload_dir: args.media.upload_dir,
            },
        }
    }
}
