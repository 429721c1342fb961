use async_trait::async_trait;
use futures::future::try_join_all;
use std::error::Error;
use validator::Validate;

use super::{
  model::{CreateCropRequest, Crop, CropFilter, CropPage, CropSummary},
  repository::CropRepository,
};
use crate::domains::expense::repository::ExpenseRepository;
use crate::domains::income::repository::IncomeRepository;
use crate::impl_service_error_conversions;

const PAGE_SIZE: i64 = 5;

#[derive(Debug)]
pub enum CropServiceError {
  ValidationError(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for CropServiceError {}

impl std::fmt::Display for CropServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CropServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      CropServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      CropServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(CropServiceError, InternalServerError);

#[async_trait]
pub trait CropService: Send + Sync {
  async fn list_crops(&self, user_id: i32, filter: CropFilter, page_number: u32)
    -> Result<CropPage, CropServiceError>;
  async fn create_crop(&self, user_id: i32, req: CreateCropRequest) -> Result<Crop, CropServiceError>;
  async fn delete_crop(&self, user_id: i32, crop_id: i32) -> Result<(), CropServiceError>;
}

pub struct CropServiceImpl<C, E, I> {
  crop_repository: C,
  expense_repository: E,
  income_repository: I,
}

impl<C, E, I> CropServiceImpl<C, E, I>
where
  C: CropRepository,
  E: ExpenseRepository,
  I: IncomeRepository,
{
  pub fn new(crop_repository: C, expense_repository: E, income_repository: I) -> Self {
    Self {
      crop_repository,
      expense_repository,
      income_repository,
    }
  }

  /// Sums ALL expenses and incomes of one crop; the list-level date range
  /// never narrows these child fetches.
  async fn summarize(&self, crop: Crop) -> Result<CropSummary, sqlx::Error> {
    let (expenses, incomes) = tokio::try_join!(
      self.expense_repository.find_by_crop(crop.id, None, None),
      self.income_repository.find_by_crop(crop.id, None, None),
    )?;

    let expense_amount: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let income_amount: f64 = incomes.iter().map(|income| income.quantity * income.amount).sum();

    Ok(CropSummary {
      id: crop.id,
      name: crop.name,
      acre: crop.acres,
      expense_amount,
      income_amount,
      profit: income_amount - expense_amount,
    })
  }
}

#[async_trait]
impl<C, E, I> CropService for CropServiceImpl<C, E, I>
where
  C: CropRepository,
  E: ExpenseRepository,
  I: IncomeRepository,
{
  async fn list_crops(
    &self,
    user_id: i32,
    filter: CropFilter,
    page_number: u32,
  ) -> Result<CropPage, CropServiceError> {
    let total_records = self.crop_repository.count(user_id, &filter).await?;
    let total_pages = (total_records + PAGE_SIZE - 1) / PAGE_SIZE;

    let offset = i64::from(page_number.saturating_sub(1)) * PAGE_SIZE;
    let crops = self.crop_repository.find_page(user_id, &filter, offset, PAGE_SIZE).await?;

    // Summaries are computed concurrently; the page order is preserved.
    let data = try_join_all(crops.into_iter().map(|crop| self.summarize(crop))).await?;

    Ok(CropPage {
      current_page: page_number,
      total_pages,
      total_records,
      data,
    })
  }

  async fn create_crop(&self, user_id: i32, req: CreateCropRequest) -> Result<Crop, CropServiceError> {
    req
      .validate()
      .map_err(|e| CropServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let crop = self.crop_repository.create(user_id, &req.name, req.acres, req.date).await?;

    Ok(crop)
  }

  async fn delete_crop(&self, user_id: i32, crop_id: i32) -> Result<(), CropServiceError> {
    let crop = self
      .crop_repository
      .find_by_id(crop_id)
      .await?
      .filter(|crop| crop.user_id == user_id)
      .ok_or_else(|| CropServiceError::NotFound("Crop not found".to_string()))?;

    self.crop_repository.delete(crop.id).await?;

    Ok(())
  }
}
