/// `/location` CRUD endpoints
use crate::error::Result;
use crate::models::{
    CreateLocationRequest, DeleteLocationRequest, LocationResponse, UpdateLocationRequest,
};
use crate::AppState;
use actix_middleware::AuthenticatedToken;
use actix_web::{web, HttpResponse};
use validator::Validate;

async fn caller_id(state: &AppState, token: &AuthenticatedToken) -> Result<i64> {
    Ok(state.auth.resolve_user(token.subject()).await?.id)
}

/// POST /location
pub async fn create_location(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
    req: web::Json<CreateLocationRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let user_id = caller_id(&state, &token).await?;

    let location = state
        .locations
        .create(user_id, req.lon, req.lat, req.comments.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
}

/// GET /location
pub async fn list_locations(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
) -> Result<HttpResponse> {
    let user_id = caller_id(&state, &token).await?;

    let locations: Vec<LocationResponse> = state
        .locations
        .list_by_user(user_id)
        .await?
        .into_iter()
        .map(LocationResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(locations))
}

/// PUT /location
pub async fn update_location(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
    req: web::Json<UpdateLocationRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let user_id = caller_id(&state, &token).await?;

    let location = state
        .locations
        .update(
            user_id,
            req.location_id,
            req.lon,
            req.lat,
            req.comments.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
}

/// DELETE /location
pub async fn delete_location(
    state: web::Data<AppState>,
    token: AuthenticatedToken,
    req: web::Json<DeleteLocationRequest>,
) -> Result<HttpResponse> {
    let user_id = caller_id(&state, &token).await?;

    let location = state.locations.delete(user_id, req.location_id).await?;

    Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
}
