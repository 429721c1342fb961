use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::model::Income;

#[async_trait]
pub trait IncomeRepository: Send + Sync {
  async fn create(
    &self,
    crop_id: i32,
    quantity: f64,
    amount: f64,
    date: NaiveDate,
    notes: Option<String>,
  ) -> Result<Income, sqlx::Error>;
  /// Incomes of one crop, newest first.
  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Income>, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<Income>, sqlx::Error>;
  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}

pub struct SqlxIncomeRepository {
  pool: PgPool,
}

impl SqlxIncomeRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl IncomeRepository for SqlxIncomeRepository {
  async fn create(
    &self,
    crop_id: i32,
    quantity: f64,
    amount: f64,
    date: NaiveDate,
    notes: Option<String>,
  ) -> Result<Income, sqlx::Error> {
    sqlx::query_as(
      r#"
      INSERT INTO incomes (crop_id, quantity, amount, date, notes)
      VALUES ($1, $2, $3, $4, $5)
      RETURNING id, crop_id, quantity, amount, date, notes, created_at
      "#,
    )
    .bind(crop_id)
    .bind(quantity)
    .bind(amount)
    .bind(date)
    .bind(notes)
    .fetch_one(&self.pool)
    .await
  }

  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Income>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, crop_id, quantity, amount, date, notes, created_at
      FROM incomes
      WHERE crop_id = $1
        AND ($2::date IS NULL OR date >= $2)
        AND ($3::date IS NULL OR date <= $3)
      ORDER BY date DESC
      "#,
    )
    .bind(crop_id)
    .bind(from_date)
    .bind(to_date)
    .fetch_all(&self.pool)
    .await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Income>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, crop_id, quantity, amount, date, notes, created_at
      FROM incomes
      WHERE id = $1
      "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM incomes WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected())
  }
}
