use validator::Validate;

use super::{ApiClient, Notice, Session};
use crate::{errors::AppError, models::dto::request::CredentialsRequest};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful, please log in";

fn validate_credentials(username: &str, password: &str) -> Result<(), Notice> {
    let request = CredentialsRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    request
        .validate()
        .map_err(|e| Notice::error(AppError::from(e).public_message()))
}

/// Logs in, stores the session and points `api` at the new token.
pub async fn login(
    api: &mut ApiClient,
    session: &mut Session,
    username: &str,
    password: &str,
) -> Result<(), Notice> {
    validate_credentials(username, password)?;

    let auth = api
        .login(username, password)
        .await
        .map_err(|e| Notice::error(e.user_message(LOGIN_FAILED)))?;

    session
        .login(&auth.user.username, &auth.token)
        .map_err(|e| {
            log::error!("Failed to persist session: {}", e);
            Notice::error(LOGIN_FAILED)
        })?;
    session.authorize(api);
    Ok(())
}

/// Creates the account. The caller is sent to the login screen afterwards.
pub async fn register(api: &ApiClient, username: &str, password: &str) -> Notice {
    if let Err(notice) = validate_credentials(username, password) {
        return notice;
    }

    match api.register(username, password).await {
        Ok(_) => Notice::success(REGISTRATION_SUCCEEDED),
        Err(e) => Notice::error(e.user_message(REGISTRATION_FAILED)),
    }
}

pub fn logout(api: &mut ApiClient, session: &mut Session) {
    if let Err(e) = session.logout() {
        log::warn!("Failed to clear stored session: {}", e);
    }
    api.set_token(None);
}
