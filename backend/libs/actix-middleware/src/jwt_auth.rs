use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use async_trait::async_trait;
use crypto_core::jwt::{Claims, TokenKind};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Why a bearer token was not accepted
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    /// Bad signature, expired, wrong kind or revoked
    #[error("{0}")]
    Unauthorized(String),

    /// The verifier could not reach its backing store
    #[error("{0}")]
    Internal(String),
}

/// Decides whether a raw bearer token is acceptable for a given token kind
///
/// Implementations check the signature and expiry and consult the revocation
/// ledger. The guard calls this on every protected request.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, AuthRejection>;
}

/// Claims of the token that authenticated the current request
#[derive(Debug, Clone)]
pub struct AuthenticatedToken(pub Claims);

impl AuthenticatedToken {
    pub fn subject(&self) -> &str {
        &self.0.sub
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn rejection_body(rejection: &AuthRejection) -> HttpResponse {
    match rejection {
        AuthRejection::Unauthorized(msg) => HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "UNAUTHORIZED",
            "msg": msg,
        })),
        AuthRejection::Internal(_) => {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "INTERNAL_ERROR",
                "msg": "Something went wrong",
            }))
        }
    }
}

fn rejection_error(rejection: AuthRejection) -> Error {
    let response = rejection_body(&rejection);
    InternalError::from_response(rejection, response).into()
}

/// JWT Authentication Middleware
///
/// Requires a bearer token of a fixed kind. On success the validated claims are
/// stored in the request extensions as [`AuthenticatedToken`]; otherwise the
/// request is short-circuited with 401 (or 500 when the verifier fails).
pub struct JwtAuthMiddleware {
    verifier: Arc<dyn TokenVerifier>,
    kind: TokenKind,
}

impl JwtAuthMiddleware {
    pub fn new(verifier: Arc<dyn TokenVerifier>, kind: TokenKind) -> Self {
        Self { verifier, kind }
    }

    /// Guard for endpoints that take an access token
    pub fn access(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self::new(verifier, TokenKind::Access)
    }

    /// Guard for endpoints that take a refresh token
    pub fn refresh(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self::new(verifier, TokenKind::Refresh)
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
            kind: self.kind,
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
    kind: TokenKind,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let verifier = self.verifier.clone();
        let kind = self.kind;

        Box::pin(async move {
            let Some(token) = bearer_token(req.request()).map(str::to_owned) else {
                let rejection =
                    AuthRejection::Unauthorized("Missing Authorization Header".to_string());
                return Ok(req.into_response(rejection_body(&rejection)).map_into_right_body());
            };

            match verifier.verify(&token, kind).await {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthenticatedToken(claims));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(rejection) => {
                    match &rejection {
                        AuthRejection::Unauthorized(reason) => {
                            tracing::warn!(path = %req.path(), kind = %kind, "Bearer token rejected: {}", reason)
                        }
                        AuthRejection::Internal(reason) => {
                            tracing::error!(path = %req.path(), "Token verification failed: {}", reason)
                        }
                    }
                    Ok(req.into_response(rejection_body(&rejection)).map_into_right_body())
                }
            }
        })
    }
}

/// FromRequest implementation for AuthenticatedToken
impl actix_web::FromRequest for AuthenticatedToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AuthenticatedToken>() {
            Some(token) => ready(Ok(token.clone())),
            None => ready(Err(rejection_error(AuthRejection::Unauthorized(
                "User not authenticated".to_string(),
            )))),
        }
    }
}
