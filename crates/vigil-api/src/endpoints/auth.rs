// Authentication endpoints
//
// Token *acquisition* lives here; token *storage* is the host app's
// concern. `login` does not install the returned token -- the caller
// decides whether to call `set_token`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{AuthToken, LoginRequest, User};

impl ApiClient {
    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, Error> {
        debug!(email, "logging in");
        self.post(
            "auth/login",
            &LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            },
        )
        .await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<User, Error> {
        self.get("auth/me").await
    }
}
