use axum::{
  extract::{Json, Path, Query, State},
  http::HeaderMap,
  response::Json as JsonResponse,
  routing::{get, post},
  Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{CreateIncomeRequest, IncomeResponse};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  utils::MessageResponse,
  AppError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
  pub from_date: Option<NaiveDate>,
  pub to_date: Option<NaiveDate>,
}

pub fn income_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/incomes", post(create_income_handler))
    .route(
      "/incomes/{id}",
      get(list_incomes_handler).delete(delete_income_handler),
    )
}

/// `{id}` here is the crop id whose incomes are listed.
pub async fn list_incomes_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Path(id): Path<i32>,
  Query(query): Query<DateRangeQuery>,
) -> Result<JsonResponse<Vec<IncomeResponse>>, AppError> {
  auth_middleware(&headers, &state.jwt_secret).await?;

  state
    .list_incomes(id, query.from_date, query.to_date)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

/// Unlike the other create endpoints this acknowledges with a plain 200.
pub async fn create_income_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Json(payload): Json<CreateIncomeRequest>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.create_income(claims.user_id, payload).await?;

  Ok(JsonResponse(MessageResponse::new("income saved")))
}

pub async fn delete_income_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Path(id): Path<i32>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.delete_income(claims.user_id, id).await?;

  Ok(JsonResponse(MessageResponse::new("income deleted")))
}

#[cfg(test)]
mod tests {
  use super::super::model::{CreateIncomeRequest, IncomeResponse};
  use crate::test_support::{
    create_crop, delete_auth, get_auth, post_json_auth, register_and_login, test_app,
  };
  use axum::http::StatusCode;
  use chrono::NaiveDate;

  fn income_payload(crop_id: i32, date: &str, quantity: f64, amount: f64) -> CreateIncomeRequest {
    CreateIncomeRequest {
      crop_id,
      quantity,
      amount,
      date: date.parse().expect("parse date"),
      notes: None,
    }
  }

  #[tokio::test]
  async fn create_income_requires_auth() {
    let app = test_app();
    let payload = income_payload(1, "2025-03-01", 10.0, 5.0);

    let request = axum::http::Request::builder()
      .method("POST")
      .uri("/api/incomes")
      .header("content-type", "application/json")
      .body(axum::body::Body::from(serde_json::to_vec(&payload).unwrap()))
      .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn create_income_acknowledges_with_ok() {
    let app = test_app();
    let token = register_and_login(&app, "inc-create@example.com").await;
    let crop_id = create_crop(&app, &token, "Rice", 3, "2025-01-01").await;

    let (status, body) =
      post_json_auth(app, "/api/incomes", &income_payload(crop_id, "2025-03-01", 10.0, 5.0), &token).await;

    assert_eq!(status, StatusCode::OK);
    let response: crate::utils::MessageResponse = serde_json::from_slice(&body).expect("deserialize response");
    assert_eq!(response.message, "income saved");
  }

  #[tokio::test]
  async fn create_income_unknown_crop_is_not_found() {
    let app = test_app();
    let token = register_and_login(&app, "inc-unknown@example.com").await;

    let (status, _) = post_json_auth(app, "/api/incomes", &income_payload(999, "2025-03-01", 10.0, 5.0), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_incomes_newest_first_with_date_range() {
    let app = test_app();
    let token = register_and_login(&app, "inc-list@example.com").await;
    let crop_id = create_crop(&app, &token, "Rice", 3, "2025-01-01").await;

    for date in ["2025-02-10", "2025-04-10", "2025-03-10"] {
      let (status, _) =
        post_json_auth(app.clone(), "/api/incomes", &income_payload(crop_id, date, 10.0, 5.0), &token).await;
      assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_auth(app.clone(), &format!("/api/incomes/{}", crop_id), &token).await;
    assert_eq!(status, StatusCode::OK);
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    assert_eq!(incomes.len(), 3);
    let dates: Vec<NaiveDate> = incomes.iter().map(|i| i.date).collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));

    let uri = format!("/api/incomes/{}?fromDate=2025-03-01&toDate=2025-03-31", crop_id);
    let (status, body) = get_auth(app, &uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].date, "2025-03-10".parse::<NaiveDate>().unwrap());
  }

  #[tokio::test]
  async fn delete_missing_income_is_not_found() {
    let app = test_app();
    let token = register_and_login(&app, "inc-missing@example.com").await;

    let (status, _) = delete_auth(app, "/api/incomes/999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_income_removes_it() {
    let app = test_app();
    let token = register_and_login(&app, "inc-delete@example.com").await;
    let crop_id = create_crop(&app, &token, "Rice", 3, "2025-01-01").await;

    let (status, _) =
      post_json_auth(app.clone(), "/api/incomes", &income_payload(crop_id, "2025-03-01", 10.0, 5.0), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_auth(app.clone(), &format!("/api/incomes/{}", crop_id), &token).await;
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    let income_id = incomes[0].id;

    let (status, _) = delete_auth(app.clone(), &format!("/api/incomes/{}", income_id), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_auth(app, &format!("/api/incomes/{}", crop_id), &token).await;
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    assert!(incomes.is_empty());
  }

  #[tokio::test]
  async fn delete_foreign_income_is_not_found() {
    let app = test_app();
    let owner_token = register_and_login(&app, "inc-owner@example.com").await;
    let other_token = register_and_login(&app, "inc-other@example.com").await;
    let crop_id = create_crop(&app, &owner_token, "Rice", 3, "2025-01-01").await;

    let (status, _) =
      post_json_auth(app.clone(), "/api/incomes", &income_payload(crop_id, "2025-03-01", 10.0, 5.0), &owner_token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_auth(app.clone(), &format!("/api/incomes/{}", crop_id), &owner_token).await;
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    let income_id = incomes[0].id;

    let (status, _) = delete_auth(app.clone(), &format!("/api/incomes/{}", income_id), &other_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get_auth(app, &format!("/api/incomes/{}", crop_id), &owner_token).await;
    let incomes: Vec<IncomeResponse> = serde_json::from_slice(&body).expect("deserialize response");
    assert_eq!(incomes.len(), 1);
  }
}
