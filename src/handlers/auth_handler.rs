use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::CredentialsRequest,
        response::{AuthResponse, UserDto},
    },
};

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state
        .user_service
        .register(&request.username, &request.password)
        .await?;
    let token = state.jwt_service.issue(user.id, &user.username)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserDto::from(user),
        token,
    }))
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;
    let token = state.jwt_service.issue(user.id, &user.username)?;

    log::info!(
        "[{}] User '{}' logged in",
        get_request_id(&req).unwrap_or_default(),
        user.username
    );

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserDto::from(user),
        token,
    }))
}
