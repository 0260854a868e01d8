//! Bearer session authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::AppState;

/// The raw bearer token of the current request, kept so logout can revoke it
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Extract the session token from the Authorization header
fn extract_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Resolves the bearer token to a live session and injects the `User` and its
/// `SessionToken` into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = state.user_service.authenticate(&token).await?;
    tracing::debug!(user = %user.username, "Authenticated request");

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/companies");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let request = request_with(Some("Bearer sb-abc123"));
        assert_eq!(extract_token(&request), Some("sb-abc123"));
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert_eq!(extract_token(&request_with(None)), None);
        assert_eq!(extract_token(&request_with(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(extract_token(&request_with(Some("Bearer   "))), None);
    }
}
