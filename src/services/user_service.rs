use std::sync::Arc;

use crate::{
    auth::PasswordHasher,
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::{user_repository::USERNAME_TAKEN, UserRepository},
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Credential store: registration, lookup and password checks.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        if self.repository.find_by_username(username).await?.is_some() {
            return Err(AppError::AlreadyExists(USERNAME_TAKEN.to_string()));
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self.repository.create(username, &password_hash).await?;

        log::info!("Registered user '{}' with id {}", user.username, user.id);
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repository.find_by_username(username).await
    }

    pub async fn verify_password(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        self.hasher.verify(password, stored_hash).await
    }

    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.find_by_username(username).await? else {
            log::warn!("Login attempt for unknown user '{}'", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self.verify_password(password, &user.password_hash).await? {
            log::warn!("Failed login for user '{}'", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use chrono::Utc;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(256, 1).unwrap()
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|username, hash| username == "alice" && hash.starts_with("$argon2id$"))
            .times(1)
            .returning(|username, hash| {
                Ok(User {
                    id: 1,
                    username: username.to_string(),
                    password_hash: hash.to_string(),
                    created_at: Utc::now(),
                })
            });

        let service = UserService::new(Arc::new(repo), hasher());
        let user = service.register("alice", "pw1").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "pw1");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|username| Ok(Some(User::test_user(1, username))));
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo), hasher());
        let result = service.register("alice", "pw1").await;

        match result {
            Err(AppError::AlreadyExists(msg)) => assert_eq!(msg, USERNAME_TAKEN),
            other => panic!("Expected AlreadyExists, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticate() {
        let hasher = hasher();
        let stored = hasher.hash_blocking("pw1").unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(move |username| {
            if username == "alice" {
                let mut user = User::test_user(1, "alice");
                user.password_hash = stored.clone();
                Ok(Some(user))
            } else {
                Ok(None)
            }
        });

        let service = UserService::new(Arc::new(repo), hasher);

        assert_eq!(service.authenticate("alice", "pw1").await.unwrap().id, 1);
        assert!(matches!(
            service.authenticate("alice", "wrong").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.authenticate("nobody", "pw1").await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
