use std::sync::Arc;

use axum::{extract::{Request, State}, middleware::Next, response::Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use service::{errors::ServiceError, intake::IntakeService};
use tracing::{debug, warn};

use crate::errors::JsonApiError;

/// Pass/fail check for admin bearer credentials. Token issuance lives
/// outside this service.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
}

/// HS256 JWT verification with `exp` enforced.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> bool {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => {
                debug!(sub = ?data.claims.sub, "admin token accepted");
                true
            }
            Err(e) => {
                warn!(err = %e, "token validation failed");
                false
            }
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub verifier: Arc<dyn TokenVerifier>,
    pub intake: IntakeService,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Route layer for mutating endpoints: rejects with 401 before the handler
/// runs unless a valid `Authorization: Bearer <token>` is present.
pub async fn require_admin(State(state): State<ServerState>, req: Request, next: Next) -> Result<Response, JsonApiError> {
    let Some(token) = bearer_token(&req) else {
        warn!(path = %req.uri().path(), method = %req.method(), "missing bearer credential");
        return Err(ServiceError::Unauthorized.into());
    };
    if !state.verifier.verify(token) {
        return Err(ServiceError::Unauthorized.into());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims { sub: String, exp: u64 }

    fn now() -> u64 {
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_secs()
    }

    fn token(secret: &str, exp: u64) -> String {
        encode(&Header::default(), &TestClaims { sub: "admin".into(), exp }, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn accepts_valid_and_rejects_bad_tokens() {
        let v = JwtVerifier::new("s3cret");
        assert!(v.verify(&token("s3cret", now() + 600)));
        assert!(!v.verify(&token("other", now() + 600)));
        assert!(!v.verify(&token("s3cret", now() - 3600)));
        assert!(!v.verify("not-a-jwt"));
    }
}
