use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token payload: `sub` carries the email, `user_id` the record id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub exp: usize,
  pub user_id: i32,
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
  let token_data = decode::<Claims>(
    token,
    &DecodingKey::from_secret(secret.as_ref()),
    &Validation::default(),
  )?;

  Ok(token_data.claims)
}

pub fn encode_jwt(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
  encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_ref()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encode_then_decode_roundtrip() {
    let claims = Claims {
      sub: "farmer@example.com".to_string(),
      exp: (chrono::Utc::now().timestamp() + 3600) as usize,
      user_id: 42,
    };

    let token = encode_jwt(&claims, "test-secret").expect("encode token");
    let decoded = decode_jwt(&token, "test-secret").expect("decode token");

    assert_eq!(decoded.sub, "farmer@example.com");
    assert_eq!(decoded.user_id, 42);
  }

  #[test]
  fn decode_rejects_wrong_secret() {
    let claims = Claims {
      sub: "farmer@example.com".to_string(),
      exp: (chrono::Utc::now().timestamp() + 3600) as usize,
      user_id: 1,
    };

    let token = encode_jwt(&claims, "test-secret").expect("encode token");
    assert!(decode_jwt(&token, "other-secret").is_err());
  }

  #[test]
  fn decode_rejects_expired_token() {
    let claims = Claims {
      sub: "farmer@example.com".to_string(),
      exp: (chrono::Utc::now().timestamp() - 3600) as usize,
      user_id: 1,
    };

    let token = encode_jwt(&claims, "test-secret").expect("encode token");
    assert!(decode_jwt(&token, "test-secret").is_err());
  }
}
