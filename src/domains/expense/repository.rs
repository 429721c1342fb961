use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::model::{Expense, ExpenseType};

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
  async fn create(
    &self,
    crop_id: i32,
    expense_type: ExpenseType,
    date: NaiveDate,
    amount: f64,
    notes: Option<String>,
  ) -> Result<Expense, sqlx::Error>;
  /// Expenses of one crop, newest first.
  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Expense>, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, sqlx::Error>;
  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}

pub struct SqlxExpenseRepository {
  pool: PgPool,
}

impl SqlxExpenseRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ExpenseRepository for SqlxExpenseRepository {
  async fn create(
    &self,
    crop_id: i32,
    expense_type: ExpenseType,
    date: NaiveDate,
    amount: f64,
    notes: Option<String>,
  ) -> Result<Expense, sqlx::Error> {
    sqlx::query_as(
      r#"
      INSERT INTO expenses (crop_id, expense_type, date, amount, notes)
      VALUES ($1, $2, $3, $4, $5)
      RETURNING id, crop_id, expense_type, date, amount, notes, created_at
      "#,
    )
    .bind(crop_id)
    .bind(expense_type)
    .bind(date)
    .bind(amount)
    .bind(notes)
    .fetch_one(&self.pool)
    .await
  }

  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Expense>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, crop_id, expense_type, date, amount, notes, created_at
      FROM expenses
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

  async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, sqlx::Error> {
    sqlx::query_as(
      r#"
      SELECT id, crop_id, expense_type, date, amount, notes, created_at
      FROM expenses
      WHERE id = $1
      "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected())
  }
}
