use async_trait::async_trait;
use chrono::NaiveDate;
use std::error::Error;

use super::{
  model::{CreateIncomeRequest, Income, IncomeResponse},
  repository::IncomeRepository,
};
use crate::domains::crop::repository::CropRepository;
use crate::impl_service_error_conversions;

#[derive(Debug)]
pub enum IncomeServiceError {
  ValidationError(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for IncomeServiceError {}

impl std::fmt::Display for IncomeServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      IncomeServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      IncomeServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      IncomeServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(IncomeServiceError, InternalServerError);

#[async_trait]
pub trait IncomeService: Send + Sync {
  async fn list_incomes(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<IncomeResponse>, IncomeServiceError>;
  async fn create_income(&self, user_id: i32, req: CreateIncomeRequest) -> Result<Income, IncomeServiceError>;
  async fn delete_income(&self, user_id: i32, income_id: i32) -> Result<(), IncomeServiceError>;
}

pub struct IncomeServiceImpl<I, C> {
  income_repository: I,
  crop_repository: C,
}

impl<I, C> IncomeServiceImpl<I, C>
where
  I: IncomeRepository,
  C: CropRepository,
{
  pub fn new(income_repository: I, crop_repository: C) -> Self {
    Self {
      income_repository,
      crop_repository,
    }
  }
}

#[async_trait]
impl<I, C> IncomeService for IncomeServiceImpl<I, C>
where
  I: IncomeRepository,
  C: CropRepository,
{
  async fn list_incomes(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<IncomeResponse>, IncomeServiceError> {
    let incomes = self.income_repository.find_by_crop(crop_id, from_date, to_date).await?;

    Ok(incomes.into_iter().map(IncomeResponse::from).collect())
  }

  async fn create_income(&self, user_id: i32, req: CreateIncomeRequest) -> Result<Income, IncomeServiceError> {
    self
      .crop_repository
      .find_by_id(req.crop_id)
      .await?
      .filter(|crop| crop.user_id == user_id)
      .ok_or_else(|| IncomeServiceError::NotFound("Crop not found".to_string()))?;

    let income = self
      .income_repository
      .create(req.crop_id, req.quantity, req.amount, req.date, req.notes)
      .await?;

    Ok(income)
  }

  async fn delete_income(&self, user_id: i32, income_id: i32) -> Result<(), IncomeServiceError> {
    let income = self
      .income_repository
      .find_by_id(income_id)
      .await?
      .ok_or_else(|| IncomeServiceError::NotFound("Income not found".to_string()))?;

    // The caller must own the parent crop; a foreign income reads as absent.
    self
      .crop_repository
      .find_by_id(income.crop_id)
      .await?
      .filter(|crop| crop.user_id == user_id)
      .ok_or_else(|| IncomeServiceError::NotFound("Income not found".to_string()))?;

    self.income_repository.delete(income.id).await?;

    Ok(())
  }
}
