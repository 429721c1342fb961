use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNAUTHORIZED, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "message": self.message,
    }));

    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<sqlx::Error> for AppError {
  fn from(error: sqlx::Error) -> Self {
    tracing::error!("Database error: {:?}", error);
    AppError::internal_server_error("server error")
  }
}

impl From<crate::domains::user::service::UserServiceError> for AppError {
  fn from(error: crate::domains::user::service::UserServiceError) -> Self {
    use crate::domains::user::service::UserServiceError;
    match error {
      UserServiceError::ValidationError(msg) => AppError::bad_request(msg),
      UserServiceError::EmailAlreadyRegistered(msg) => AppError::bad_request(msg),
      UserServiceError::InvalidCredentials(msg) => AppError::bad_request(msg),
      UserServiceError::InternalServerError(msg) => {
        tracing::error!("User service error: {}", msg);
        AppError::internal_server_error("server error")
      }
    }
  }
}

impl From<crate::domains::crop::service::CropServiceError> for AppError {
  fn from(error: crate::domains::crop::service::CropServiceError) -> Self {
    use crate::domains::crop::service::CropServiceError;
    match error {
      CropServiceError::ValidationError(msg) => AppError::bad_request(msg),
      CropServiceError::NotFound(msg) => AppError::not_found(msg),
      CropServiceError::InternalServerError(msg) => {
        tracing::error!("Crop service error: {}", msg);
        AppError::internal_server_error("server error")
      }
    }
  }
}

impl From<crate::domains::expense::service::ExpenseServiceError> for AppError {
  fn from(error: crate::domains::expense::service::ExpenseServiceError) -> Self {
    use crate::domains::expense::service::ExpenseServiceError;
    match error {
      ExpenseServiceError::ValidationError(msg) => AppError::bad_request(msg),
      ExpenseServiceError::NotFound(msg) => AppError::not_found(msg),
      ExpenseServiceError::InternalServerError(msg) => {
        tracing::error!("Expense service error: {}", msg);
        AppError::internal_server_error("server error")
      }
    }
  }
}

impl From<crate::domains::income::service::IncomeServiceError> for AppError {
  fn from(error: crate::domains::income::service::IncomeServiceError) -> Self {
    use crate::domains::income::service::IncomeServiceError;
    match error {
      IncomeServiceError::ValidationError(msg) => AppError::bad_request(msg),
      IncomeServiceError::NotFound(msg) => AppError::not_found(msg),
      IncomeServiceError::InternalServerError(msg) => {
        tracing::error!("Income service error: {}", msg);
        AppError::internal_server_error("server error")
      }
    }
  }
}
