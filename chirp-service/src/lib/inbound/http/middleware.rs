use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates session tokens and adds the user to request
/// extensions.
///
/// Extraction and validation failures all render as the same generic 401;
/// the specific reason (missing header, bad signature, expired, bad subject)
/// is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_value = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = auth::extract_bearer_token(header_value).map_err(|e| {
        tracing::warn!(error = %e, "Bearer extraction failed");
        unauthorized()
    })?;

    let user_id = state.session_signer.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Missing or invalid authorization token"
        })),
    )
        .into_response()
}

/// Middleware counting requests through the static file scope, feeding the
/// admin metrics page.
pub async fn track_visits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state
        .fileserver_hits
        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    next.run(req).await
}
