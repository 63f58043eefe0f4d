use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session token payload: the caller's identity plus the validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(id: i64, username: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            id,
            username: username.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp().max(0) as usize,
        }
    }
}
