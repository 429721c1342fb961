use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new().max_connections(10).connect(database_url).await
}
