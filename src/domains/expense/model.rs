use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed expense categories; enum membership is enforced at
/// deserialization, before anything reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "expense_type", rename_all = "lowercase")]
pub enum ExpenseType {
  Ploughing,
  Planting,
  Fertilizer,
  Pesticide,
  Irrigation,
  Harvesting,
  Labor,
  Others,
}

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
pub struct Expense {
  pub id: i32,
  pub crop_id: i32,
  pub expense_type: ExpenseType,
  pub date: NaiveDate,
  pub amount: f64,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
  pub crop_id: i32,
  #[serde(rename = "type")]
  pub expense_type: ExpenseType,
  pub date: NaiveDate,
  pub amount: f64,
  pub notes: Option<String>,
}

/// Wire shape of one expense as listed per crop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
  pub id: i32,
  #[serde(rename = "type")]
  pub expense_type: ExpenseType,
  pub date: NaiveDate,
  pub amount: f64,
  pub notes: Option<String>,
}

impl From<Expense> for ExpenseResponse {
  fn from(expense: Expense) -> Self {
    Self {
      id: expense.id,
      expense_type: expense.expense_type,
      date: expense.date,
      amount: expense.amount,
      notes: expense.notes,
    }
  }
}
