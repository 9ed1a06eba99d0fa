use launch::config::Config;
use launch::db::{MemoryStore, PgStore};
use launch::engine::Engine;
use launch::error::Error;
use launch::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    init_logging();

    let config = Config::from_env()?;

    let engine = match &config.database_url {
        Some(database_url) => {
            Engine::new(PgStore::new(database_url, config.max_connections).await?)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, rides are kept in memory");
            Engine::new(MemoryStore::default())
        }
    };

    serve(engine, config.listen_addr, config.identity_header).await
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
