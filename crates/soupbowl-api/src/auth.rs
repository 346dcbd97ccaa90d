//! Shared-secret gate for admin routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Extractor that only succeeds when `X-Admin-Password` matches the
/// configured password.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided == Some(&*state.admin_password) {
            Ok(AdminAuth)
        } else {
            tracing::warn!(uri = %parts.uri, "rejected admin request");
            Err(ApiError::Unauthorized)
        }
    }
}
