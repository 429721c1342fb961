use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::error::Error;
use validator::Validate;

use super::{
  model::{LoginRequest, LoginResponse, RegisterRequest, User},
  repository::UserRepository,
};
use crate::impl_service_error_conversions;
use crate::utils::jwt::{encode_jwt, Claims};

const TOKEN_VALIDITY_HOURS: i64 = 24;

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError(String),
  EmailAlreadyRegistered(String),
  InvalidCredentials(String),
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::EmailAlreadyRegistered(msg) => write!(f, "Email Already Registered: {}", msg),
      UserServiceError::InvalidCredentials(msg) => write!(f, "Invalid Credentials: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError);

#[async_trait]
pub trait UserService: Send + Sync {
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError>;
  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError>;
}

pub struct UserServiceImpl<R> {
  user_repository: R,
  jwt_secret: String,
}

impl<R> UserServiceImpl<R>
where
  R: UserRepository,
{
  pub fn new(user_repository: R, jwt_secret: String) -> Self {
    Self {
      user_repository,
      jwt_secret,
    }
  }
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
  R: UserRepository,
{
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    crate::utils::validate_password(&req.password)
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let existing = self.user_repository.find_by_email(&req.email).await?;
    if existing.is_some() {
      return Err(UserServiceError::EmailAlreadyRegistered("user already exists".to_string()));
    }

    let hashed_password = crate::utils::hash_password(&req.password);
    let user = self.user_repository.create(&req.name, &req.email, &hashed_password).await?;

    tracing::info!("Registered user {}", user.id);

    Ok(user)
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    let user = self
      .user_repository
      .find_by_email(&req.email)
      .await?
      .ok_or_else(|| UserServiceError::InvalidCredentials("Email does not exist, please register".to_string()))?;

    let hashed_input_password = crate::utils::hash_password(&req.password);
    if user.password != hashed_input_password {
      return Err(UserServiceError::InvalidCredentials("Invalid password".to_string()));
    }

    let expiration = Utc::now()
      .checked_add_signed(Duration::hours(TOKEN_VALIDITY_HOURS))
      .ok_or_else(|| UserServiceError::InternalServerError("Failed to calculate expiration time".to_string()))?
      .timestamp() as usize;

    let claims = Claims {
      sub: user.email.clone(),
      exp: expiration,
      user_id: user.id,
    };

    let token = encode_jwt(&claims, &self.jwt_secret)
      .map_err(|e| UserServiceError::InternalServerError(format!("JWT encoding failed: {}", e)))?;

    Ok(LoginResponse { token })
  }
}
