/// Request authentication middleware for Axum
///
/// Validates Bearer session tokens from the `Authorization` header and adds
/// an [`AuthContext`] to request extensions. Every task and profile handler
/// runs behind this gate; an invalid token short-circuits the request with
/// 401 before any handler executes.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use tasktrail_shared::auth::middleware::{create_auth_middleware, AuthContext};
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(create_auth_middleware("secret")));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authenticated identity attached to request extensions
///
/// Added after successful token validation; handlers extract it with Axum's
/// `Extension` extractor and use `user_id` as the owner for every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated token claims
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a Bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Same envelope shape as the API error responses
        let (status, error, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Missing authorization header".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
        };

        let body = axum::Json(serde_json::json!({
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Bearer-token authentication middleware
///
/// Extracts `Authorization: Bearer <token>`, validates it, and injects an
/// [`AuthContext`] into request extensions. Stateless: no database access.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing, the token is invalid,
/// or the token has expired; 400 if the header is not a Bearer token.
pub async fn auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    req.extensions_mut().insert(AuthContext::new(claims.sub));

    Ok(next.run(req).await)
}

/// Creates an authentication middleware closure capturing the token secret
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use tasktrail_shared::auth::middleware::create_auth_middleware;
///
/// let app: Router = Router::new()
///     .route("/protected", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_auth_middleware("secret")));
/// ```
pub fn create_auth_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(auth_middleware(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use axum::{body::Body, middleware, routing::get, Extension, Router};
    use tower::Service as _;

    const SECRET: &str = "middleware-test-secret-at-least-32-bytes";

    #[test]
    fn test_auth_context_new() {
        let user_id = Uuid::new_v4();
        let context = AuthContext::new(user_id);
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidFormat("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AuthError::InvalidToken("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    fn test_app() -> Router {
        async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
            auth.user_id.to_string()
        }

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(create_auth_middleware(SECRET)))
    }

    #[tokio::test]
    async fn test_valid_token_injects_context() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();

        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .uri("/whoami")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], user_id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut app = test_app();
        let response = app
            .call(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_bad_request() {
        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .uri("/whoami")
                    .header("authorization", "Token abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
