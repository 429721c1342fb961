use axum::{
  extract::{Json, State},
  http::StatusCode,
  response::Json as JsonResponse,
  routing::{post, Router},
};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::{
  state::{AppState, SharedAppState},
  utils::MessageResponse,
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/user/register", post(register_handler))
    .route("/user/login", post(login_handler))
}

pub async fn register_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, JsonResponse<MessageResponse>), AppError> {
  state.register(payload).await?;

  Ok((
    StatusCode::CREATED,
    JsonResponse(MessageResponse::new("user registered successfully")),
  ))
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<LoginRequest>,
) -> Result<JsonResponse<LoginResponse>, AppError> {
  state.login(payload).await.map(JsonResponse).map_err(Into::into)
}

#[cfg(test)]
mod tests {
  use super::super::model::{LoginRequest, LoginResponse, RegisterRequest};
  use crate::test_support::{post_json, test_app, TEST_JWT_SECRET};
  use crate::utils::jwt::decode_jwt;
  use axum::http::StatusCode;

  fn register_payload(email: &str) -> RegisterRequest {
    RegisterRequest {
      name: "Test Farmer".to_string(),
      email: email.to_string(),
      password: "password123".to_string(),
    }
  }

  #[tokio::test]
  async fn register_returns_created() {
    let app = test_app();
    let (status, body) = post_json(app, "/api/user/register", &register_payload("reg@example.com")).await;

    assert_eq!(status, StatusCode::CREATED);
    let response: crate::utils::MessageResponse = serde_json::from_slice(&body).expect("deserialize response");
    assert_eq!(response.message, "user registered successfully");
  }

  #[tokio::test]
  async fn register_duplicate_email_is_rejected() {
    let app = test_app();
    let payload = register_payload("dup@example.com");

    let (status, _) = post_json(app.clone(), "/api/user/register", &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(app, "/api/user/register", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn register_invalid_email_is_rejected() {
    let app = test_app();
    let (status, _) = post_json(app, "/api/user/register", &register_payload("not-an-email")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn login_issues_decodable_token() {
    let app = test_app();
    let (status, _) = post_json(app.clone(), "/api/user/register", &register_payload("login@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = LoginRequest {
      email: "login@example.com".to_string(),
      password: "password123".to_string(),
    };
    let (status, body) = post_json(app, "/api/user/login", &login).await;
    assert_eq!(status, StatusCode::OK);

    let response: LoginResponse = serde_json::from_slice(&body).expect("deserialize response");
    let claims = decode_jwt(&response.token, TEST_JWT_SECRET).expect("decode issued token");
    assert_eq!(claims.sub, "login@example.com");
    assert!(claims.user_id >= 1);
  }

  #[tokio::test]
  async fn login_unknown_email_is_rejected() {
    let app = test_app();
    let login = LoginRequest {
      email: "missing@example.com".to_string(),
      password: "password123".to_string(),
    };
    let (status, _) = post_json(app, "/api/user/login", &login).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn login_wrong_password_is_rejected() {
    let app = test_app();
    let (status, _) = post_json(app.clone(), "/api/user/register", &register_payload("wrongpw@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = LoginRequest {
      email: "wrongpw@example.com".to_string(),
      password: "password124".to_string(),
    };
    let (status, _) = post_json(app, "/api/user/login", &login).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
