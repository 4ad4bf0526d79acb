use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // An invalid email cannot belong to any account; respond exactly as if
    // the credentials were wrong.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    let result = state
        .user_service
        .login(&email, body.password)
        .await
        .map_err(|e| {
            // The distinct reason is diagnostic only; the response stays generic.
            if matches!(
                e,
                UserError::NotFoundByEmail(_) | UserError::InvalidCredentials
            ) {
                tracing::warn!(error = %e, "Login rejected");
            }
            ApiError::from(e)
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&result.user).into(),
            token: result.access_token,
            refresh_token: result.refresh_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
    pub refresh_token: String,
}
