use tokio::signal;

use dotenvy::dotenv;

use farmers_pocket_api::app::create_app;
use farmers_pocket_api::config::AppConfig;
use farmers_pocket_api::db::pool::create_pool;
use farmers_pocket_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt::init();

  let config = AppConfig::from_env()?;

  let pool = create_pool(&config.database_url)
    .await
    .expect("Failed to create database pool");

  sqlx::migrate!("./migrations").run(&pool).await?;

  println!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool, &config.jwt_secret).await;
  let app = create_app(app_state, config.cors_allowed_origins.clone());

  let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

  println!("Server running on http://0.0.0.0:{}", config.port);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  println!("Received termination signal, shutting down gracefully...");
}
