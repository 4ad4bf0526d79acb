use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::refresh_session::bearer_from_headers;
use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn revoke_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = bearer_from_headers(&headers)?;

    state
        .user_service
        .revoke_session(refresh_token)
        .await
        .map_err(|e| {
            if matches!(e, UserError::RefreshToken(_)) {
                tracing::warn!(error = %e, "Revoke rejected");
            }
            ApiError::from(e)
        })?;

    Ok(StatusCode::NO_CONTENT)
}
