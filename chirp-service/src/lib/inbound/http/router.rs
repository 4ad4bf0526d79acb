use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

use auth::SessionTokenSigner;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::create_user::create_user;
use super::handlers::get_chirp::get_chirp;
use super::handlers::list_chirps::list_chirps;
use super::handlers::login::login;
use super::handlers::publish_chirp::publish_chirp;
use super::handlers::refresh_session::refresh_session;
use super::handlers::revoke_session::revoke_session;
use super::middleware::authenticate as auth_middleware;
use super::middleware::track_visits;
use crate::domain::chirp::service::ChirpService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::chirp::PostgresChirpRepository;
use crate::outbound::repositories::refresh_token::PostgresRefreshTokenStore;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository, PostgresRefreshTokenStore>>,
    pub chirp_service: Arc<ChirpService<PostgresChirpRepository>>,
    pub session_signer: Arc<SessionTokenSigner>,
    pub platform: String,
    pub fileserver_hits: Arc<AtomicU64>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository, PostgresRefreshTokenStore>>,
    chirp_service: Arc<ChirpService<PostgresChirpRepository>>,
    session_signer: Arc<SessionTokenSigner>,
    platform: String,
) -> Router {
    let state = AppState {
        user_service,
        chirp_service,
        session_signer,
        platform,
        fileserver_hits: Arc::new(AtomicU64::new(0)),
    };

    let public_routes = Router::new()
        .route("/api/healthz", get(health_check))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh_session))
        .route("/api/revoke", post(revoke_session))
        .route("/api/chirps", get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp));

    let protected_routes = Router::new()
        .route("/api/chirps", post(publish_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let app_routes = Router::new()
        .nest_service("/app", ServeDir::new("."))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_visits));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(app_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
