use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn refresh_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = bearer_from_headers(&headers)?;

    let token = state
        .user_service
        .refresh_session(refresh_token)
        .await
        .map_err(|e| {
            if matches!(e, UserError::RefreshToken(_)) {
                tracing::warn!(error = %e, "Refresh rejected");
            }
            ApiError::from(e)
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData { token },
    ))
}

/// A malformed header is a caller mistake (400), not an auth failure (401).
pub(super) fn bearer_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    auth::extract_bearer_token(header_value).map_err(|e| {
        tracing::warn!(error = %e, "Bearer extraction failed");
        ApiError::BadRequest(e.to_string())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
