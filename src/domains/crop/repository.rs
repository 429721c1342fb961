use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::model::{Crop, CropFilter};

#[async_trait]
pub trait CropRepository: Send + Sync {
  async fn create(&self, user_id: i32, name: &str, acres: i32, date: NaiveDate) -> Result<Crop, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, sqlx::Error>;
  async fn count(&self, user_id: i32, filter: &CropFilter) -> Result<i64, sqlx::Error>;
  /// One page of matching crops in id order, the store default.
  async fn find_page(&self, user_id: i32, filter: &CropFilter, offset: i64, limit: i64)
    -> Result<Vec<Crop>, sqlx::Error>;
  /// Returns the number of rows removed.
  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}

pub struct SqlxCropRepository {
  pool: PgPool,
}

impl SqlxCropRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CropRepository for SqlxCropRepository {
  async fn create(&self, user_id: i32, name: &str, acres: i32, date: NaiveDate) -> Result<Crop, sqlx::Error> {
    sqlx::query_as(
      r#"
      INSERT INTO crops (user_id, name, acres, date)
      VALUES ($1, $2, $3, $4)
      RETURNING id, user_id, name, acres, date, created_at
      "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(acres)
    .bind(date)
    .fetch_one(&self.pool)
    .await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, user_id, name, acres, date, created_at
      FROM crops
      WHERE id = $1
      "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
  }

  async fn count(&self, user_id: i32, filter: &CropFilter) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
      r#"
      SELECT COUNT(*)
      FROM crops
      WHERE user_id = $1
        AND ($2::int4 IS NULL OR id = $2)
        AND ($3::date IS NULL OR date >= $3)
        AND ($4::date IS NULL OR date <= $4)
      "#,
    )
    .bind(user_id)
    .bind(filter.crop_id)
    .bind(filter.from_date)
    .bind(filter.to_date)
    .fetch_one(&self.pool)
    .await
  }

  async fn find_page(
    &self,
    user_id: i32,
    filter: &CropFilter,
    offset: i64,
    limit: i64,
  ) -> Result<Vec<Crop>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, user_id, name, acres, date, created_at
      FROM crops
      WHERE user_id = $1
        AND ($2::int4 IS NULL OR id = $2)
        AND ($3::date IS NULL OR date >= $3)
        AND ($4::date IS NULL OR date <= $4)
      ORDER BY id
      LIMIT $5 OFFSET $6
      "#,
    )
    .bind(user_id)
    .bind(filter.crop_id)
    .bind(filter.from_date)
    .bind(filter.to_date)
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM crops WHERE id = $1").bind(id).execute(&self.pool).await?;

    Ok(result.rows_affected())
  }
}
