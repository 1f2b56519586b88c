//! Authentication REST API routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::{
    database::{AccountStore, SqliteAccountStore},
    models::{ErrorResponse, LoginResponse},
    password::{Argon2Hasher, SecretHasher},
    verifier::{AuthError, CredentialVerifier, Verification},
};

/// Shared authentication state
pub struct AuthState<S = SqliteAccountStore, H = Argon2Hasher> {
    pub verifier: CredentialVerifier<S, H>,
}

impl<S: AccountStore, H: SecretHasher> AuthState<S, H> {
    pub fn new(verifier: CredentialVerifier<S, H>) -> Self {
        Self { verifier }
    }
}

/// Create auth router
pub fn auth_router<S: AccountStore, H: SecretHasher>(state: Arc<AuthState<S, H>>) -> Router {
    Router::new()
        .route("/login", post(login::<S, H>))
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}

/// POST /auth/login - Check an email/password submission
///
/// Every rejection gets the same 401 body so responses do not reveal which
/// check failed.
async fn login<S: AccountStore, H: SecretHasher>(
    State(state): State<Arc<AuthState<S, H>>>,
    Json(input): Json<Value>,
) -> Response {
    match state.verifier.verify(&input).await {
        Ok(Verification::Authenticated(account)) => Json(LoginResponse { account }).into_response(),
        Ok(Verification::Rejected(_)) => {
            error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
        }
        Err(AuthError::DataAccess(_)) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Authentication service unavailable",
        ),
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Login failed"),
    }
}
