use anyhow::{bail, Context, Result};
use personalization_service::{
    config::StoreBackend, models::ContextSnapshot, Config, DigestService, InMemoryInterestStore,
    InterestStore, RedisInterestStore,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the digest
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let Some(snapshot_path) = std::env::args().nth(1) else {
        bail!("usage: personalization-service <snapshot.json>");
    };

    let config = Config::from_env().context("Failed to load config")?;

    info!(
        service = %config.service.service_name,
        store = ?config.service.store_backend,
        "Starting digest build"
    );

    let store: Arc<dyn InterestStore> = match config.service.store_backend {
        StoreBackend::Memory => Arc::new(InMemoryInterestStore::new()),
        StoreBackend::Redis => {
            let client = redis::Client::open(config.redis.url.clone())
                .context("Failed to create Redis client")?;
            Arc::new(
                RedisInterestStore::new(client)
                    .with_key_prefix(config.redis.key_prefix.clone())
                    .with_ttl_secs(config.redis.interest_ttl_secs),
            )
        }
    };

    let raw = tokio::fs::read_to_string(&snapshot_path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path))?;
    let snapshot: ContextSnapshot =
        serde_json::from_str(&raw).context("Failed to parse context snapshot")?;

    let service = DigestService::from_config(&config, store)?;
    let digest = service.build_digest(snapshot).await;

    println!("{}", serde_json::to_string_pretty(&digest)?);
    Ok(())
}
