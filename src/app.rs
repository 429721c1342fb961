use axum::{
  http::{HeaderValue, Method},
  response::Html,
  routing::get,
  Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
  domains::{
    crop::rest::crop_routes, expense::rest::expense_routes, income::rest::income_routes, user::rest::user_routes,
  },
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState, cors_allowed_origins: Option<Vec<String>>) -> Router {
  let api_routes = user_routes()
    .merge(crop_routes())
    .merge(expense_routes())
    .merge(income_routes());

  Router::new()
    .route("/", get(index_handler))
    .nest("/api", api_routes)
    .layer(cors_layer(cors_allowed_origins))
    .with_state(state)
}

fn cors_layer(allowed_origins: Option<Vec<String>>) -> CorsLayer {
  let cors = CorsLayer::new()
    .allow_methods([Method::GET, Method::POST, Method::DELETE])
    .allow_headers(Any);

  match allowed_origins {
    Some(origins) => {
      let origins: Vec<HeaderValue> = origins.iter().filter_map(|origin| origin.parse().ok()).collect();
      cors.allow_origin(AllowOrigin::list(origins))
    }
    None => cors.allow_origin(Any),
  }
}

pub async fn index_handler() -> Html<String> {
  Html("<h1>Farmer's Pocket API</h1>".to_string())
}
