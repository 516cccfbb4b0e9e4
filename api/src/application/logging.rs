use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::LogArgs;

pub fn init_logger(args: &LogArgs) -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_new(&args.filter)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if args.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}
