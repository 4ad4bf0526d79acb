use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Visit counter page for the static file scope.
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.fileserver_hits.load(Ordering::Relaxed);

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>",
        hits
    ))
}

/// Delete every user (chirps and refresh tokens cascade). Only allowed on a
/// dev platform; anything else is forbidden outright.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if !state.platform.eq_ignore_ascii_case("dev") {
        return Err(ApiError::Forbidden(
            "Reset is only available on the dev platform".to_string(),
        ));
    }

    state
        .user_service
        .delete_all_users()
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::OK)
}
