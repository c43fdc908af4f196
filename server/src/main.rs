use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt::layer, layer::SubscriberExt, registry,
    util::SubscriberInitExt,
};

use server::consts::DEFAULT_LOG_FILTERS;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("LOG")
        .from_env_lossy();

    for rule in DEFAULT_LOG_FILTERS {
        filter = filter.add_directive(rule.parse().expect("DEFAULT_LOG_FILTERS misconfiguration"));
    }
    registry().with(filter).with(layer()).init();

    server::start_server().await
}
