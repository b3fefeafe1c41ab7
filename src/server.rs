use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{connection::handle_connection, store::Keyspace};

/// Command line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "redis-store", version, about = "An in-memory Redis-compatible store")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "REDIS_STORE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on, 0 picks a free one
    #[arg(short, long, env = "REDIS_STORE_PORT", default_value_t = 6379)]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug)]
pub struct RedisServer {
    listener: TcpListener,
    keyspace: Arc<Keyspace>,
}

impl RedisServer {
    pub async fn bind(config: &ServerConfig) -> Result<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {}", address))?;

        Ok(Self {
            listener,
            keyspace: Arc::new(Keyspace::new()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read the listener address")
    }

    /// Accepts clients forever, serving each one on its own task.
    pub async fn run(self) {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };

            info!(%peer, "accepted connection");

            let keyspace = Arc::clone(&self.keyspace);

            tokio::spawn(async move {
                match handle_connection(stream, keyspace).await {
                    Ok(()) => info!(%peer, "connection closed"),
                    Err(err) => warn!(%peer, error = %err, "connection ended with an error"),
                }
            });
        }
    }
}
