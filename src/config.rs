use std::{
    net::{AddrParseError, SocketAddr},
    time::Duration,
};

use clap::Parser;
use thiserror::Error;

use crate::{
    cache::{CacheConfig, CacheError},
    store::{StoreConfig, StoreError},
};

#[derive(Parser, Debug)]
#[command(name = "article-service")]
#[command(about = "Article HTTP service with a read-through collection cache")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Upper bound on a single request, store and cache calls included
    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    #[arg(long)]
    pub debug: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid listen address '{0}'")]
    ListenAddr(String, #[source] AddrParseError),

    #[error("Invalid store configuration")]
    Store(#[from] StoreError),

    #[error("Invalid cache configuration")]
    Cache(#[from] CacheError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen: SocketAddr,
    pub request_timeout: Duration,
    pub store: StoreConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Combine command-line arguments with the environment (and `.env`, if present).
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_addr = format!("{}:{}", args.host, args.port);
        let listen: SocketAddr = bind_addr
            .parse()
            .map_err(|e| ConfigError::ListenAddr(bind_addr, e))?;

        Ok(Self {
            listen,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            store: StoreConfig::from_env()?,
            cache: CacheConfig::from_env()?,
        })
    }
}
