use axum::{
  extract::{Json, Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::{get, post},
  Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{CreateExpenseRequest, ExpenseResponse};
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

pub fn expense_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/expenses", post(create_expense_handler))
    .route(
      "/expenses/{id}",
      get(list_expenses_handler).delete(delete_expense_handler),
    )
}

/// `{id}` here is the crop id whose expenses are listed.
pub async fn list_expenses_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Path(id): Path<i32>,
  Query(query): Query<DateRangeQuery>,
) -> Result<JsonResponse<Vec<ExpenseResponse>>, AppError> {
  auth_middleware(&headers, &state.jwt_secret).await?;

  state
    .list_expenses(id, query.from_date, query.to_date)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn create_expense_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, JsonResponse<MessageResponse>), AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.create_expense(claims.user_id, payload).await?;

  Ok((StatusCode::CREATED, JsonResponse(MessageResponse::new("expense saved"))))
}

pub async fn delete_expense_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Path(id): Path<i32>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  let claims = auth_middleware(&headers, &state.jwt_secret).await?;

  state.delete_expense(claims.user_id, id).await?;

  Ok(JsonResponse(MessageResponse::new("expense deleted")))
}
