//! Identity boundary. Authentication happens upstream; the auth proxy forwards the
//! resolved user id in `x-user-id`. A configured `DEV_USER_ID` stands in when the
//! header is absent so the API can be exercised locally without the proxy.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The external identity of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub external_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        resolve_user_id(header, state.config.dev_user_id.as_deref())
            .map(|external_id| AuthUser { external_id })
            .ok_or(AppError::Unauthorized)
    }
}

/// Header first, then the dev fallback. Blank values are ignored.
pub fn resolve_user_id(header: Option<&str>, dev_user_id: Option<&str>) -> Option<String> {
    header
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| dev_user_id.map(str::trim).filter(|v| !v.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins_over_dev_id() {
        assert_eq!(
            resolve_user_id(Some("user_123"), Some("dev_user_1")),
            Some("user_123".to_string())
        );
    }

    #[test]
    fn test_dev_id_used_when_header_missing_or_blank() {
        assert_eq!(
            resolve_user_id(None, Some("dev_user_1")),
            Some("dev_user_1".to_string())
        );
        assert_eq!(
            resolve_user_id(Some("  "), Some("dev_user_1")),
            Some("dev_user_1".to_string())
        );
    }

    #[test]
    fn test_no_identity_resolves_to_none() {
        assert_eq!(resolve_user_id(None, None), None);
        assert_eq!(resolve_user_id(Some(""), Some("")), None);
    }
}
