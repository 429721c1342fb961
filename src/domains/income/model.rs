use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
pub struct Income {
  pub id: i32,
  pub crop_id: i32,
  pub quantity: f64,
  pub amount: f64,
  pub date: NaiveDate,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeRequest {
  pub crop_id: i32,
  pub quantity: f64,
  pub amount: f64,
  pub date: NaiveDate,
  pub notes: Option<String>,
}

/// Wire shape of one income entry as listed per crop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
  pub id: i32,
  pub date: NaiveDate,
  pub quantity: f64,
  pub amount: f64,
  pub notes: Option<String>,
}

impl From<Income> for IncomeResponse {
  fn from(income: Income) -> Self {
    Self {
      id: income.id,
      date: income.date,
      quantity: income.quantity,
      amount: income.amount,
      notes: income.notes,
    }
  }
}
