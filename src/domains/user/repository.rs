use async_trait::async_trait;
use sqlx::PgPool;

use super::model::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
  /// `password` is the already-hashed credential; repositories never see
  /// the raw value.
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, sqlx::Error>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

pub struct SqlxUserRepository {
  pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as(
      r#"
      INSERT INTO users (name, email, password)
      VALUES ($1, $2, $3)
      RETURNING id, name, email, password, created_at
      "#,
    )
    .bind(name)
    .bind(email)
    .bind(password)
    .fetch_one(&self.pool)
    .await
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, name, email, password, created_at
      FROM users
      WHERE email = $1
      "#,
    )
    .bind(email)
    .fetch_optional(&self.pool)
    .await
  }
}
