use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use std::collections::HashSet;

use crate::error::WebError;
use crate::state::AppState;

#[derive(Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Extractor guarding admin routes: requires `Authorization: Bearer <key>`
/// with a key from the comma-separated `API_KEYS` env value.
pub struct RequireApiKey;

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if state.api_keys.is_valid(token) => Ok(Self),
            _ => {
                tracing::warn!("Invalid API key attempt");
                Err(WebError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_keys() {
        let keys = ApiKeys::from_comma_separated("alpha, beta ,,gamma");
        assert!(keys.is_valid("alpha"));
        assert!(keys.is_valid("beta"));
        assert!(keys.is_valid("gamma"));
        assert!(!keys.is_valid(""));
        assert!(!keys.is_valid("delta"));
    }
}
