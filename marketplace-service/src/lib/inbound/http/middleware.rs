use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token to an identity and adds it to
/// request extensions as `AuthenticatedIdentity`.
///
/// A header that is not valid ASCII is treated as absent.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let identity = state
        .session_service
        .current_user(authorization.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!("Bearer authentication failed: {}", e);
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
