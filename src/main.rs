use anyhow::Result;
use clap::Parser;
use tracing::info;

use redis_store::server::{RedisServer, ServerConfig};

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("redis_store=info"));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::parse();
    let server = RedisServer::bind(&config).await?;

    info!("listening on {}", server.local_addr()?);
    server.run().await;

    Ok(())
}
