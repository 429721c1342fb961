use std::sync::{
  atomic::{AtomicI32, Ordering},
  Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tower::ServiceExt;

use crate::{
  app::create_app,
  domains::{
    crop::{
      model::{CreateCropRequest, Crop, CropFilter, CropPage},
      repository::CropRepository,
      service::CropServiceImpl,
    },
    expense::{
      model::{CreateExpenseRequest, Expense, ExpenseType},
      repository::ExpenseRepository,
      service::ExpenseServiceImpl,
    },
    income::{
      model::{CreateIncomeRequest, Income},
      repository::IncomeRepository,
      service::IncomeServiceImpl,
    },
    user::{
      model::{LoginRequest, LoginResponse, RegisterRequest, User},
      repository::UserRepository,
      service::UserServiceImpl,
    },
  },
  middleware::auth::AUTH_HEADER,
  state::SharedAppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

struct Table<T> {
  rows: Mutex<Vec<T>>,
  next_id: AtomicI32,
}

impl<T> Default for Table<T> {
  fn default() -> Self {
    Self {
      rows: Mutex::new(Vec::new()),
      next_id: AtomicI32::new(0),
    }
  }
}

impl<T> Table<T> {
  fn next_id(&self) -> i32 {
    self.next_id.fetch_add(1, Ordering::SeqCst) + 1
  }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
  table: Arc<Table<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, sqlx::Error> {
    let user = User {
      id: self.table.next_id(),
      name: name.to_string(),
      email: email.to_string(),
      password: password.to_string(),
      created_at: Some(Utc::now()),
    };
    self.table.rows.lock().unwrap().push(user.clone());
    Ok(user)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
  }
}

#[derive(Clone, Default)]
pub struct InMemoryCropRepository {
  table: Arc<Table<Crop>>,
}

fn crop_matches(crop: &Crop, user_id: i32, filter: &CropFilter) -> bool {
  crop.user_id == user_id
    && filter.crop_id.is_none_or(|id| crop.id == id)
    && filter.from_date.is_none_or(|from| crop.date >= from)
    && filter.to_date.is_none_or(|to| crop.date <= to)
}

#[async_trait]
impl CropRepository for InMemoryCropRepository {
  async fn create(&self, user_id: i32, name: &str, acres: i32, date: NaiveDate) -> Result<Crop, sqlx::Error> {
    let crop = Crop {
      id: self.table.next_id(),
      user_id,
      name: name.to_string(),
      acres,
      date,
      created_at: Some(Utc::now()),
    };
    self.table.rows.lock().unwrap().push(crop.clone());
    Ok(crop)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
  }

  async fn count(&self, user_id: i32, filter: &CropFilter) -> Result<i64, sqlx::Error> {
    let rows = self.table.rows.lock().unwrap();
    Ok(rows.iter().filter(|c| crop_matches(c, user_id, filter)).count() as i64)
  }

  async fn find_page(
    &self,
    user_id: i32,
    filter: &CropFilter,
    offset: i64,
    limit: i64,
  ) -> Result<Vec<Crop>, sqlx::Error> {
    let rows = self.table.rows.lock().unwrap();
    let mut matching: Vec<Crop> = rows.iter().filter(|c| crop_matches(c, user_id, filter)).cloned().collect();
    matching.sort_by_key(|c| c.id);
    Ok(matching
      .into_iter()
      .skip(offset.max(0) as usize)
      .take(limit.max(0) as usize)
      .collect())
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|c| c.id != id);
    Ok((before - rows.len()) as u64)
  }
}

#[derive(Clone, Default)]
pub struct InMemoryExpenseRepository {
  table: Arc<Table<Expense>>,
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
  async fn create(
    &self,
    crop_id: i32,
    expense_type: ExpenseType,
    date: NaiveDate,
    amount: f64,
    notes: Option<String>,
  ) -> Result<Expense, sqlx::Error> {
    let expense = Expense {
      id: self.table.next_id(),
      crop_id,
      expense_type,
      date,
      amount,
      notes,
      created_at: Some(Utc::now()),
    };
    self.table.rows.lock().unwrap().push(expense.clone());
    Ok(expense)
  }

  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Expense>, sqlx::Error> {
    let rows = self.table.rows.lock().unwrap();
    let mut matching: Vec<Expense> = rows
      .iter()
      .filter(|e| {
        e.crop_id == crop_id
          && from_date.is_none_or(|from| e.date >= from)
          && to_date.is_none_or(|to| e.date <= to)
      })
      .cloned()
      .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(matching)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|e| e.id != id);
    Ok((before - rows.len()) as u64)
  }
}

#[derive(Clone, Default)]
pub struct InMemoryIncomeRepository {
  table: Arc<Table<Income>>,
}

#[async_trait]
impl IncomeRepository for InMemoryIncomeRepository {
  async fn create(
    &self,
    crop_id: i32,
    quantity: f64,
    amount: f64,
    date: NaiveDate,
    notes: Option<String>,
  ) -> Result<Income, sqlx::Error> {
    let income = Income {
      id: self.table.next_id(),
      crop_id,
      quantity,
      amount,
      date,
      notes,
      created_at: Some(Utc::now()),
    };
    self.table.rows.lock().unwrap().push(income.clone());
    Ok(income)
  }

  async fn find_by_crop(
    &self,
    crop_id: i32,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
  ) -> Result<Vec<Income>, sqlx::Error> {
    let rows = self.table.rows.lock().unwrap();
    let mut matching: Vec<Income> = rows
      .iter()
      .filter(|i| {
        i.crop_id == crop_id
          && from_date.is_none_or(|from| i.date >= from)
          && to_date.is_none_or(|to| i.date <= to)
      })
      .cloned()
      .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(matching)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Income>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|i| i.id != id);
    Ok((before - rows.len()) as u64)
  }
}

pub fn test_state() -> SharedAppState {
  let users = InMemoryUserRepository::default();
  let crops = InMemoryCropRepository::default();
  let expenses = InMemoryExpenseRepository::default();
  let incomes = InMemoryIncomeRepository::default();

  SharedAppState::from_parts(
    Arc::new(UserServiceImpl::new(users, TEST_JWT_SECRET.to_string())),
    Arc::new(CropServiceImpl::new(crops.clone(), expenses.clone(), incomes.clone())),
    Arc::new(ExpenseServiceImpl::new(expenses, crops.clone())),
    Arc::new(IncomeServiceImpl::new(incomes, crops)),
    TEST_JWT_SECRET,
  )
}

pub fn test_app() -> Router {
  create_app(test_state(), None)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

pub async fn post_json_auth<T: Serialize>(app: Router, uri: &str, body: &T, token: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .header(AUTH_HEADER, format!("Bearer {}", token))
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .header(AUTH_HEADER, format!("Bearer {}", token))
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("DELETE")
    .uri(uri)
    .header(AUTH_HEADER, format!("Bearer {}", token))
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

pub async fn register_and_login(app: &Router, email: &str) -> String {
  let register = RegisterRequest {
    name: "Test Farmer".to_string(),
    email: email.to_string(),
    password: "password123".to_string(),
  };
  let (status, _) = post_json(app.clone(), "/api/user/register", &register).await;
  assert_eq!(status, StatusCode::CREATED);

  let login = LoginRequest {
    email: email.to_string(),
    password: "password123".to_string(),
  };
  let (status, body) = post_json(app.clone(), "/api/user/login", &login).await;
  assert_eq!(status, StatusCode::OK);

  let response: LoginResponse = serde_json::from_slice(&body).expect("deserialize login response");
  response.token
}

/// Creates a crop and returns its id. The create endpoint only
/// acknowledges, so the id is read back from the paginated listing.
pub async fn create_crop(app: &Router, token: &str, name: &str, acres: i32, date: &str) -> i32 {
  let payload = CreateCropRequest {
    name: name.to_string(),
    acres,
    date: date.parse().expect("parse date"),
  };
  let (status, _) = post_json_auth(app.clone(), "/api/crops", &payload, token).await;
  assert_eq!(status, StatusCode::CREATED);

  let mut newest: Option<i32> = None;
  let mut page_number = 1;
  loop {
    let (status, body) = get_auth(app.clone(), &format!("/api/crops?pageNumber={}", page_number), token).await;
    assert_eq!(status, StatusCode::OK);
    let page: CropPage = serde_json::from_slice(&body).expect("deserialize crop page");
    if page.data.is_empty() {
      break;
    }
    for summary in &page.data {
      newest = newest.max(Some(summary.id));
    }
    page_number += 1;
  }

  newest.expect("created crop is listed")
}

pub async fn add_expense(app: &Router, token: &str, crop_id: i32, date: &str, amount: f64) {
  let payload = CreateExpenseRequest {
    crop_id,
    expense_type: ExpenseType::Others,
    date: date.parse().expect("parse date"),
    amount,
    notes: None,
  };
  let (status, _) = post_json_auth(app.clone(), "/api/expenses", &payload, token).await;
  assert_eq!(status, StatusCode::CREATED);
}

pub async fn add_income(app: &Router, token: &str, crop_id: i32, date: &str, quantity: f64, amount: f64) {
  let payload = CreateIncomeRequest {
    crop_id,
    quantity,
    amount,
    date: date.parse().expect("parse date"),
    notes: None,
  };
  let (status, _) = post_json_auth(app.clone(), "/api/incomes", &payload, token).await;
  assert_eq!(status, StatusCode::OK);
}
