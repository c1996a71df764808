use cabquote::config::Config;
use cabquote::engine::Engine;
use cabquote::error::Error;
use cabquote::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // RUST_LOG may come from .env
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().map_err(|err| {
        tracing::error!(error = %err, "failed to load configuration");
        err
    })?;

    let engine = Engine::new(&config)?;

    serve(engine, config.listen_addr).await
}
