use axum::{
  extract::{Json, Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::{delete, get},
  Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{CreateCropRequest, CropFilter, CropPage};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  utils::MessageResponse,
  AppError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCropsQuery {
  pub from_date: Option<NaiveDate>,
  pub to_date: Option<NaiveDate>,
  pub crop_id: Option<i32>,
  pub page_number: Option<u32>,
}

pub fn crop_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/crops", get(list_crops_handler).post(create_crop_handler))
    .route("/crops/{id}", delete(delete_crop_handler))
}

pub async fn list_crops_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Query(query): Query<ListCropsQuery>,
) -> Result<JsonResponse<CropPage>, AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  let filter = CropFilter {
    crop_id: query.crop_id,
    from_date: query.from_date,
    to_date: query.to_date,
  };

  state
    .list_crops(claims.user_id, filter, query.page_number.unwrap_or(1))
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn create_crop_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Json(payload): Json<CreateCropRequest>,
) -> Result<(StatusCode, JsonResponse<MessageResponse>), AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.create_crop(claims.user_id, payload).await?;

  Ok((StatusCode::CREATED, JsonResponse(MessageResponse::new("crop added"))))
}

pub async fn delete_crop_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Path(id): Path<i32>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.delete_crop(claims.user_id, id).await?;

  Ok(JsonResponse(MessageResponse::new("crop deleted")))
}

#[cfg(test)]
mod tests {
  use super::super::model::CropPage;
  use crate::test_support::{
    add_expense, add_income, create_crop, delete_auth, get_auth, register_and_login, test_app,
  };
  use axum::http::StatusCode;

  async fn list_crops(app: axum::Router, token: &str, query: &str) -> CropPage {
    let uri = if query.is_empty() {
      "/api/crops".to_string()
    } else {
      format!("/api/crops?{}", query)
    };
    let (status, body) = get_auth(app, &uri, token).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).expect("deserialize crop page")
  }

  #[tokio::test]
  async fn list_crops_requires_auth() {
    let app = test_app();
    let request = axum::http::Request::builder()
      .method("GET")
      .uri("/api/crops")
      .body(axum::body::Body::empty())
      .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn crop_without_children_has_zero_profit() {
    let app = test_app();
    let token = register_and_login(&app, "crop-zero@example.com").await;
    create_crop(&app, &token, "Wheat", 10, "2025-01-05").await;

    let page = list_crops(app, &token, "").await;
    assert_eq!(page.total_records, 1);
    assert_eq!(page.data.len(), 1);

    let summary = &page.data[0];
    assert_eq!(summary.name, "Wheat");
    assert_eq!(summary.acre, 10);
    assert_eq!(summary.expense_amount, 0.0);
    assert_eq!(summary.income_amount, 0.0);
    assert_eq!(summary.profit, 0.0);
  }

  #[tokio::test]
  async fn profit_is_income_minus_expense() {
    let app = test_app();
    let token = register_and_login(&app, "crop-profit@example.com").await;
    let crop_id = create_crop(&app, &token, "Wheat", 10, "2025-01-05").await;

    add_expense(&app, &token, crop_id, "2025-01-10", 100.0).await;
    add_expense(&app, &token, crop_id, "2025-01-20", 50.0).await;
    add_income(&app, &token, crop_id, "2025-06-01", 10.0, 5.0).await;
    add_income(&app, &token, crop_id, "2025-06-15", 2.0, 20.0).await;

    let page = list_crops(app, &token, "").await;
    let summary = &page.data[0];
    assert_eq!(summary.expense_amount, 150.0);
    assert_eq!(summary.income_amount, 90.0);
    assert_eq!(summary.profit, -60.0);
  }

  #[tokio::test]
  async fn date_filter_applies_to_crop_not_children() {
    let app = test_app();
    let token = register_and_login(&app, "crop-dates@example.com").await;
    let january_crop = create_crop(&app, &token, "January", 1, "2025-01-15").await;
    create_crop(&app, &token, "February", 1, "2025-02-01").await;

    // Children dated outside the window must still be summed.
    add_expense(&app, &token, january_crop, "2025-07-01", 40.0).await;
    add_income(&app, &token, january_crop, "2025-08-01", 3.0, 30.0).await;

    let page = list_crops(app, &token, "fromDate=2025-01-01&toDate=2025-01-31").await;
    assert_eq!(page.total_records, 1);
    assert_eq!(page.data.len(), 1);

    let summary = &page.data[0];
    assert_eq!(summary.name, "January");
    assert_eq!(summary.expense_amount, 40.0);
    assert_eq!(summary.income_amount, 90.0);
    assert_eq!(summary.profit, 50.0);
  }

  #[tokio::test]
  async fn crop_id_filter_selects_one_crop() {
    let app = test_app();
    let token = register_and_login(&app, "crop-byid@example.com").await;
    let first = create_crop(&app, &token, "First", 1, "2025-01-01").await;
    create_crop(&app, &token, "Second", 2, "2025-01-02").await;

    let page = list_crops(app, &token, &format!("cropId={}", first)).await;
    assert_eq!(page.total_records, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, first);
  }

  #[tokio::test]
  async fn pagination_is_five_per_page() {
    let app = test_app();
    let token = register_and_login(&app, "crop-pages@example.com").await;
    for i in 0..7 {
      create_crop(&app, &token, &format!("Crop {}", i), 1, "2025-01-01").await;
    }

    let page = list_crops(app.clone(), &token, "").await;
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_records, 7);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data.len(), 5);

    let page = list_crops(app.clone(), &token, "pageNumber=2").await;
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_records, 7);
    assert_eq!(page.data.len(), 2);

    // First page ends where the second begins.
    let first_page = list_crops(app, &token, "pageNumber=1").await;
    assert!(first_page.data.iter().all(|c| c.id < page.data[0].id));
  }

  #[tokio::test]
  async fn page_past_the_end_is_empty_with_metadata() {
    let app = test_app();
    let token = register_and_login(&app, "crop-overrun@example.com").await;
    for i in 0..3 {
      create_crop(&app, &token, &format!("Crop {}", i), 1, "2025-01-01").await;
    }

    let page = list_crops(app, &token, "pageNumber=5").await;
    assert_eq!(page.current_page, 5);
    assert_eq!(page.total_records, 3);
    assert_eq!(page.total_pages, 1);
    assert!(page.data.is_empty());
  }

  #[tokio::test]
  async fn crops_are_scoped_to_their_owner() {
    let app = test_app();
    let first_token = register_and_login(&app, "crop-owner-a@example.com").await;
    let second_token = register_and_login(&app, "crop-owner-b@example.com").await;
    create_crop(&app, &first_token, "Mine", 1, "2025-01-01").await;

    let page = list_crops(app, &second_token, "").await;
    assert_eq!(page.total_records, 0);
    assert!(page.data.is_empty());
  }

  #[tokio::test]
  async fn delete_crop_removes_it() {
    let app = test_app();
    let token = register_and_login(&app, "crop-delete@example.com").await;
    let crop_id = create_crop(&app, &token, "Doomed", 1, "2025-01-01").await;

    let (status, _) = delete_auth(app.clone(), &format!("/api/crops/{}", crop_id), &token).await;
    assert_eq!(status, StatusCode::OK);

    let page = list_crops(app, &token, "").await;
    assert_eq!(page.total_records, 0);
  }

  #[tokio::test]
  async fn delete_missing_crop_is_not_found() {
    let app = test_app();
    let token = register_and_login(&app, "crop-missing@example.com").await;

    let (status, _) = delete_auth(app, "/api/crops/999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_foreign_crop_is_not_found() {
    let app = test_app();
    let owner_token = register_and_login(&app, "crop-own@example.com").await;
    let other_token = register_and_login(&app, "crop-thief@example.com").await;
    let crop_id = create_crop(&app, &owner_token, "Guarded", 1, "2025-01-01").await;

    let (status, _) = delete_auth(app.clone(), &format!("/api/crops/{}", crop_id), &other_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let page = list_crops(app, &owner_token, "").await;
    assert_eq!(page.total_records, 1);
  }

  #[tokio::test]
  async fn create_crop_rejects_empty_name() {
    let app = test_app();
    let token = register_and_login(&app, "crop-noname@example.com").await;

    let payload = serde_json::json!({
      "name": "",
      "acres": 5,
      "date": "2025-01-01",
    });
    let (status, _) = crate::test_support::post_json_auth(app, "/api/crops", &payload, &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
