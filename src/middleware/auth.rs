use axum::http::HeaderMap;

use crate::utils::error::AppError;
use crate::utils::jwt::Claims;

/// Header carrying the bearer credential on protected endpoints.
pub const AUTH_HEADER: &str = "sessionauth";

/// All failures collapse into the same 401 so callers cannot tell a
/// missing header from a rejected token.
pub async fn auth_middleware(headers: &HeaderMap, secret: &str) -> Result<Claims, AppError> {
  let auth_header = headers
    .get(AUTH_HEADER)
    .ok_or_else(|| AppError::unauthorized("Invalid token access"))?
    .to_str()
    .map_err(|_| AppError::unauthorized("Invalid token access"))?;

  // The credential may arrive bare or scheme-prefixed.
  let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

  let claims =
    crate::utils::jwt::decode_jwt(token, secret).map_err(|_| AppError::unauthorized("Invalid token access"))?;

  Ok(claims)
}
