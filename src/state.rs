use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domains::crop::{
  model::{CreateCropRequest, Crop, CropFilter, CropPage},
  repository::SqlxCropRepository,
  service::{CropService, CropServiceError, CropServiceImpl},
};
use crate::domains::expense::{
  model::{CreateExpenseRequest, Expense, ExpenseResponse},
  repository::SqlxExpenseRepository,
  service::{ExpenseService, ExpenseServiceError, ExpenseServiceImpl},
};
use crate::domains::income::{
  model::{CreateIncomeRequest, Income, IncomeResponse},
  repository::SqlxIncomeRepository,
  service::{IncomeService, IncomeServiceError, IncomeServiceImpl},
};
use crate::domains::user::{
  model::{LoginRequest, LoginResponse, RegisterRequest, User},
  repository::SqlxUserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn register(&self, req: RegisterRequest) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn login(
    &self,
    req: LoginRequest,
  ) -> impl std::future::Future<Output = Result<LoginResponse, UserServiceError>> + Send;
  fn list_crops(
    &self,
    user_id: i32,
    filter: CropFilter,
    page_number: u32,
  ) -> impl std::future::Future<Output = Result<CropPage, CropServiceError>> + Send;
  fn create_crop(
    &self,
    user_id: i32,
    req: CreateCropRequest,
  ) -> impl std::future::Future<Output = Result<Crop, CropServiceError>> + Send;
  fn delete_crop(
    &self,
    user_id: i32,
    crop_id: i32,
  ) -> impl std::future::Future<Output = Result<(), CropServiceError>> + Send;
  fn list_expenses(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> impl std::future::Future<Output = Result<Vec<ExpenseResponse>, ExpenseServiceError>> + Send;
  fn create_expense(
    &self,
    user_id: i32,
    req: CreateExpenseRequest,
  ) -> impl std::future::Future<Output = Result<Expense, ExpenseServiceError>> + Send;
  fn delete_expense(
    &self,
    user_id: i32,
    expense_id: i32,
  ) -> impl std::future::Future<Output = Result<(), ExpenseServiceError>> + Send;
  fn list_incomes(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> impl std::future::Future<Output = Result<Vec<IncomeResponse>, IncomeServiceError>> + Send;
  fn create_income(
    &self,
    user_id: i32,
    req: CreateIncomeRequest,
  ) -> impl std::future::Future<Output = Result<Income, IncomeServiceError>> + Send;
  fn delete_income(
    &self,
    user_id: i32,
    income_id: i32,
  ) -> impl std::future::Future<Output = Result<(), IncomeServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
  pub crop_service: Arc<dyn CropService>,
  pub expense_service: Arc<dyn ExpenseService>,
  pub income_service: Arc<dyn IncomeService>,
  pub jwt_secret: Arc<str>,
}

impl SharedAppState {
  pub async fn new(pool: PgPool, jwt_secret: &str) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(
      SqlxUserRepository::new(pool.clone()),
      jwt_secret.to_string(),
    ));
    let crop_service = Arc::new(CropServiceImpl::new(
      SqlxCropRepository::new(pool.clone()),
      SqlxExpenseRepository::new(pool.clone()),
      SqlxIncomeRepository::new(pool.clone()),
    ));
    let expense_service = Arc::new(ExpenseServiceImpl::new(
      SqlxExpenseRepository::new(pool.clone()),
      SqlxCropRepository::new(pool.clone()),
    ));
    let income_service = Arc::new(IncomeServiceImpl::new(
      SqlxIncomeRepository::new(pool.clone()),
      SqlxCropRepository::new(pool),
    ));

    Self::from_parts(user_service, crop_service, expense_service, income_service, jwt_secret)
  }

  /// Assembles a state from already-built services; tests use this to run
  /// the full router against in-memory repositories.
  pub fn from_parts(
    user_service: Arc<dyn UserService>,
    crop_service: Arc<dyn CropService>,
    expense_service: Arc<dyn ExpenseService>,
    income_service: Arc<dyn IncomeService>,
    jwt_secret: &str,
  ) -> Self {
    Self {
      user_service,
      crop_service,
      expense_service,
      income_service,
      jwt_secret: Arc::from(jwt_secret),
    }
  }
}

impl AppState for SharedAppState {
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    self.user_service.register(req).await
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    self.user_service.login(req).await
  }

  async fn list_crops(
    &self,
    user_id: i32,
    filter: CropFilter,
    page_number: u32,
  ) -> Result<CropPage, CropServiceError> {
    self.crop_service.list_crops(user_id, filter, page_number).await
  }

  async fn create_crop(&self, user_id: i32, req: CreateCropRequest) -> Result<Crop, CropServiceError> {
    self.crop_service.create_crop(user_id, req).await
  }

  async fn delete_crop(&self, user_id: i32, crop_id: i32) -> Result<(), CropServiceError> {
    self.crop_service.delete_crop(user_id, crop_id).await
  }

  async fn list_expenses(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<ExpenseResponse>, ExpenseServiceError> {
    self.expense_service.list_expenses(crop_id, from_date, to_date).await
  }

  async fn create_expense(&self, user_id: i32, req: CreateExpenseRequest) -> Result<Expense, ExpenseServiceError> {
    self.expense_service.create_expense(user_id, req).await
  }

  async fn delete_expense(&self, user_id: i32, expense_id: i32) -> Result<(), ExpenseServiceError> {
    self.expense_service.delete_expense(user_id, expense_id).await
  }

  async fn list_incomes(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<IncomeResponse>, IncomeServiceError> {
    self.income_service.list_incomes(crop_id, from_date, to_date).await
  }

  async fn create_income(&self, user_id: i32, req: CreateIncomeRequest) -> Result<Income, IncomeServiceError> {
    self.income_service.create_income(user_id, req).await
  }

  async fn delete_income(&self, user_id: i32, income_id: i32) -> Result<(), IncomeServiceError> {
    self.income_service.delete_income(user_id, income_id).await
  }
}
