use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
pub struct Crop {
  pub id: i32,
  pub user_id: i32,
  pub name: String,
  pub acres: i32,
  pub date: NaiveDate,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateCropRequest {
  #[validate(length(min = 1, max = 255, message = "name is required"))]
  pub name: String,
  pub acres: i32,
  pub date: NaiveDate,
}

/// Selection applied to the caller's crops; the date range filters the
/// crop's own planting date, never the expenses/incomes summed per crop.
#[derive(Debug, Clone, Default)]
pub struct CropFilter {
  pub crop_id: Option<i32>,
  pub from_date: Option<NaiveDate>,
  pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSummary {
  pub id: i32,
  pub name: String,
  pub acre: i32,
  pub expense_amount: f64,
  pub income_amount: f64,
  pub profit: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPage {
  pub current_page: u32,
  pub total_pages: i64,
  pub total_records: i64,
  pub data: Vec<CropSummary>,
}
