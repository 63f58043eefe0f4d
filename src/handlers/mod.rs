pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::{
    app_state::AppState, auth::AuthMiddleware, errors::AppError,
    services::quiz_service::QUIZ_NOT_FOUND,
};

/// Registers application state and every route. Shared by `main` and the tests.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            AppError::ValidationError(format!("Invalid request body: {}", err)).into()
        });
        // A non-numeric id can never match an owned quiz.
        let path_config = web::PathConfig::default()
            .error_handler(|_err, _req| AppError::NotFound(QUIZ_NOT_FOUND.to_string()).into());

        cfg.app_data(web::Data::new(state))
            .app_data(json_config)
            .service(health_handler::health_check)
            .service(health_handler::health_check_ready)
            .service(
                web::scope("/api")
                    .service(auth_handler::register)
                    .service(auth_handler::login)
                    .service(
                        web::scope("/quizzes")
                            .wrap(AuthMiddleware)
                            .app_data(path_config)
                            .service(quiz_handler::list_quizzes)
                            .service(quiz_handler::create_quiz)
                            .service(quiz_handler::get_quiz)
                            .service(quiz_handler::update_quiz)
                            .service(quiz_handler::delete_quiz),
                    ),
            );
    }
}
