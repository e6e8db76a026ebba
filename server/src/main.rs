use lavka_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first, so config and logging see .env values
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    lavka_server::init_logger_with_file(None, log_dir.to_str());

    tracing::info!("Lavka storefront server starting");

    let state = ServerState::initialize(config).await?;
    Server::new(state).run().await?;

    Ok(())
}
