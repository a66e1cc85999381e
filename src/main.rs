use anyhow::Context;
use bri::{Config, commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing; stdout is reserved for records and index dumps
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::run(&config).with_context(|| format!("bri {} failed", config.command.name()))?;

    Ok(())
}
