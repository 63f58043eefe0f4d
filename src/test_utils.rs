use crate::{app_state::AppState, config::Config};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Application state backed by a fresh in-memory database.
    pub async fn test_state() -> AppState {
        AppState::new(Config::test_config())
            .await
            .expect("in-memory state should initialise")
    }

    /// Registers a user straight through the service layer and returns a bearer token.
    pub async fn registered_token(state: &AppState, username: &str) -> String {
        let user = state
            .user_service
            .register(username, "password")
            .await
            .expect("registration should succeed");
        state
            .jwt_service
            .issue(user.id, &user.username)
            .expect("token should be issued")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    pub fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[actix_web::test]
    async fn test_registered_token_verifies() {
        let state = test_state().await;
        let token = registered_token(&state, "fixture").await;

        let claims = state.jwt_service.verify(&token).unwrap();
        assert_eq!(claims.username, "fixture");
    }
}
