use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered teacher. The password hash never leaves the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
impl User {
    pub fn test_user(id: i64, username: &str) -> Self {
        User {
            id,
            username: username.to_string(),
            password_hash: "$argon2id$v=19$m=256,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
            created_at: Utc::now(),
        }
    }
}
