use tokio::net::TcpListener;
use tripjournal::config::AppConfig;
use tripjournal::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;
    let app = tripjournal::build_app(pool, config.secure_cookies).await?;

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
