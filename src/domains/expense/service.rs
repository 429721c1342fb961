use async_trait::async_trait;
use chrono::NaiveDate;
use std::error::Error;

use super::{
  model::{CreateExpenseRequest, Expense, ExpenseResponse},
  repository::ExpenseRepository,
};
use crate::domains::crop::repository::CropRepository;
use crate::impl_service_error_conversions;

#[derive(Debug)]
pub enum ExpenseServiceError {
  ValidationError(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for ExpenseServiceError {}

impl std::fmt::Display for ExpenseServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ExpenseServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      ExpenseServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      ExpenseServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(ExpenseServiceError, InternalServerError);

#[async_trait]
pub trait ExpenseService: Send + Sync {
  async fn list_expenses(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<ExpenseResponse>, ExpenseServiceError>;
  async fn create_expense(&self, user_id: i32, req: CreateExpenseRequest) -> Result<Expense, ExpenseServiceError>;
  async fn delete_expense(&self, user_id: i32, expense_id: i32) -> Result<(), ExpenseServiceError>;
}

pub struct ExpenseServiceImpl<E, C> {
  expense_repository: E,
  crop_repository: C,
}

impl<E, C> ExpenseServiceImpl<E, C>
where
  E: ExpenseRepository,
  C: CropRepository,
{
  pub fn new(expense_repository: E, crop_repository: C) -> Self {
    Self {
      expense_repository,
      crop_repository,
    }
  }
}

#[async_trait]
impl<E, C> ExpenseService for ExpenseServiceImpl<E, C>
where
  E: ExpenseRepository,
  C: CropRepository,
{
  async fn list_expenses(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<ExpenseResponse>, ExpenseServiceError> {
    let expenses = self.expense_repository.find_by_crop(crop_id, from_date, to_date).await?;

    Ok(expenses.into_iter().map(ExpenseResponse::from).collect())
  }

  async fn create_expense(&self, user_id: i32, req: CreateExpenseRequest) -> Result<Expense, ExpenseServiceError> {
    self
      .crop_repository
      .find_by_id(req.crop_id)
      .await?
      .filter(|crop| crop.user_id == user_id)
      .ok_or_else(|| ExpenseServiceError::NotFound("Crop not found".to_string()))?;

    let expense = self
      .expense_repository
      .create(req.crop_id, req.expense_type, req.date, req.amount, req.notes)
      .await?;

    Ok(expense)
  }

  async fn delete_expense(&self, user_id: i32, expense_id: i32) -> Result<(), ExpenseServiceError> {
    let expense = self
      .expense_repository
      .find_by_id(expense_id)
      .await?
      .ok_or_else(|| ExpenseServiceError::NotFound("Expense not found".to_string()))?;

    // The caller must own the parent crop; a foreign expense reads as absent.
    self
      .crop_repository
      .find_by_id(expense.crop_id)
      .await?
      .filter(|crop| crop.user_id == user_id)
      .ok_or_else(|| ExpenseServiceError::NotFound("Expense not found".to_string()))?;

    self.expense_repository.delete(expense.id).await?;

    Ok(())
  }
}
