use std::sync::Arc;

use crate::{
    auth::{JwtService, PasswordHasher},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{SqliteQuizRepository, SqliteUserRepository},
    services::{quiz_service::QuizService, user_service::UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let hasher = PasswordHasher::new(config.argon2_memory_kib, config.argon2_iterations)?;
        let user_repository = Arc::new(SqliteUserRepository::new(&db));
        let user_service = Arc::new(UserService::new(user_repository, hasher));

        let quiz_repository = Arc::new(SqliteQuizRepository::new(&db));
        let quiz_service = Arc::new(QuizService::new(quiz_repository));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Ok(Self {
            user_service,
            quiz_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[actix_web::test]
    async fn test_app_state_from_test_config() {
        let state = AppState::new(Config::test_config()).await.unwrap();
        assert!(state.db.health_check().await.is_ok());
    }
}
