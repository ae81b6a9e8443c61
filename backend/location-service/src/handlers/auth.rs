/// Signup, login, logout and token refresh endpoints
use crate::error::Result;
use crate::models::{
    AccessTokenResponse, CredentialsRequest, LoginResponse, MessageResponse, SecretResponse,
};
use crate::AppState;
use actix_middleware::AuthenticatedToken;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let user = state.auth.sign_up(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "User {} was created",
        user.username
    ))))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let pair = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        msg: format!("Logged in as {}", req.username),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// POST /logout/access
pub async fn logout_access(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
) -> Result<HttpResponse> {
    state.auth.revoke(token.claims()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Access token has been revoked")))
}

/// POST /logout/refresh
pub async fn logout_refresh(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
) -> Result<HttpResponse> {
    state.auth.revoke(token.claims()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Refresh token has been revoked")))
}

/// POST /token/refresh
pub async fn refresh_token(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
) -> Result<HttpResponse> {
    let access_token = state.auth.refresh_access_token(token.claims()).await?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse { access_token }))
}

/// GET /secret
pub async fn secret(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
) -> Result<HttpResponse> {
    let user = state.auth.resolve_user(token.subject()).await?;

    Ok(HttpResponse::Ok().json(SecretResponse::from(&user)))
}
