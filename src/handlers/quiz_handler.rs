use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, ListQuizzesQuery, UpdateQuizRequest},
        response::MessageResponse,
    },
};

// Mounted under the authenticated `/api/quizzes` scope.

#[get("")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<ListQuizzesQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().to_filter();
    let response = state.quiz_service.list_quizzes(auth.id(), &filter).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .get_quiz(auth.id(), id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state
        .quiz_service
        .create_quiz(auth.id(), &request.title, &request.description)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[put("/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state
        .quiz_service
        .update_quiz(auth.id(), id.into_inner(), request.into())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_quiz(auth.id(), id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Quiz deleted successfully".to_string(),
    }))
}
