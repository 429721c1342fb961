use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::ValidationError;

pub mod error;
pub mod jwt;

/// Acknowledgement body returned by create/delete endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
  pub message: String,
}

impl MessageResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

pub fn hash_password(password: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(password.as_bytes());
  let result = hasher.finalize();
  format!("{:x}", result)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
  let letter_regex = Regex::new(r"[a-zA-Z]").unwrap();
  let digit_regex = Regex::new(r"\d").unwrap();

  if !letter_regex.is_match(password) {
    return Err(ValidationError::new("password must contain a letter"));
  }

  if !digit_regex.is_match(password) {
    return Err(ValidationError::new("password must contain a digit"));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hash_password_is_stable() {
    assert_eq!(hash_password("password123"), hash_password("password123"));
    assert_ne!(hash_password("password123"), hash_password("password124"));
  }

  #[test]
  fn test_validate_password_valid() {
    assert!(validate_password("password123").is_ok());
    assert!(validate_password("Harvest25").is_ok());
    assert!(validate_password("A1").is_ok());
  }

  #[test]
  fn test_validate_password_missing_letter() {
    let result = validate_password("12345678");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(format!("{:?}", err).contains("password must contain a letter"));
  }

  #[test]
  fn test_validate_password_missing_digit() {
    let result = validate_password("abcdefghijk");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(format!("{:?}", err).contains("password must contain a digit"));
  }

  #[test]
  fn test_validate_password_empty() {
    assert!(validate_password("").is_err());
  }
}
