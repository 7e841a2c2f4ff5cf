// Session authentication
//
// Cookie-based session login/logout and credential rotation. The login
// endpoint sets a session cookie in the client's jar; subsequent
// requests use that cookie automatically.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ChangePasswordBody, LoginBody};

impl ApiClient {
    /// Authenticate with username/password.
    ///
    /// `POST /api/login`. The server answers HTTP 200 with
    /// `{"success": false, "message": "..."}` for bad credentials or a
    /// disabled account; both surface as [`Error::Authentication`].
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("login")?;
        debug!(username, "logging in");

        let body = LoginBody {
            username,
            password: password.expose_secret(),
        };

        let ack = self.post_raw(url, &body).await.map_err(|e| match e {
            Error::SessionExpired => Error::Authentication {
                message: String::new(),
            },
            Error::Forbidden { message } => Error::Authentication { message },
            other => other,
        })?;

        if !ack.success {
            return Err(Error::Authentication {
                message: ack.message.unwrap_or_default(),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /api/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("logout")?;
        debug!("logging out");
        self.post_empty(url).await?;
        debug!("logout complete");
        Ok(())
    }

    /// Rotate the current user's password.
    ///
    /// `POST /api/user/change-password`. Whether `new` and `confirm`
    /// must match is decided by the server.
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
        confirm: &SecretString,
    ) -> Result<Option<String>, Error> {
        let url = self.api_url("user/change-password")?;
        debug!("changing password");
        let body = ChangePasswordBody {
            current_password: current.expose_secret(),
            new_password: new.expose_secret(),
            confirm_password: confirm.expose_secret(),
        };
        let ack = self.post(url, &body).await?;
        Ok(ack.message)
    }
}
