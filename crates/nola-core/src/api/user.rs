use serde::Serialize;

use crate::auth::Session;

use super::{ApiClient, ApiError};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange administrator credentials for a session.
    ///
    /// The returned session is not stored; hand it to `SessionStore::login`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        self.post("/admin/user/login", &LoginRequest { username, password })
            .await
    }
}
