use anyhow::Context;
use std::env;

/// Process configuration, collected once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub port: u16,
  pub jwt_secret: String,
  pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL environment variable must be set")?;

    let port = env::var("PORT")
      .unwrap_or_else(|_| "8000".to_string())
      .parse()
      .context("PORT must be a valid port number")?;

    let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET environment variable must be set")?;

    let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok().map(|raw| parse_origins(&raw));

    Ok(Self {
      database_url,
      port,
      jwt_secret,
      cors_allowed_origins,
    })
  }
}

fn parse_origins(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(|origin| origin.trim().to_string())
    .filter(|origin| !origin.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn origins_split_and_trimmed() {
    let origins = parse_origins("https://a.example.com, https://b.example.com,");
    assert_eq!(origins, vec!["https://a.example.com", "https://b.example.com"]);
  }

  #[test]
  fn origins_empty_input() {
    assert!(parse_origins("").is_empty());
  }
}
