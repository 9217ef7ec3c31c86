use anyhow::Context;
use article_service::{
    cache::{self, ArticleCache},
    config::{AppConfig, Args},
    http::{router, HttpServer},
    store::{self, ArticleStore},
    ArticleService,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("article_service={filter_level},tower_http={filter_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = AppConfig::load(&args).context("failed to load configuration")?;

    let store = store::connect(&config.store)
        .await
        .context("failed to connect to article store")?;
    store.ping().await.context("article store is unreachable")?;
    info!("Connected to {:?} article store", config.store.backend);

    let cache = cache::connect(&config.cache).context("failed to create article cache")?;
    cache.ping().await.context("article cache is unreachable")?;
    info!("Connected to {:?} article cache", config.cache.backend);

    let service = ArticleService::new(store, cache).with_deadline(config.request_timeout);
    let app = router(service);

    HttpServer::new(config.listen, app)
        .serve()
        .await
        .context("server error")?;

    info!("Article service stopped");
    Ok(())
}
