// Session login/logout
//
// The login endpoint answers with a `BBOX_ID` cookie; the client keeps it
// and replays it on every later call until logout.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::auth;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::router::client::RouterClient;
use crate::session::{SESSION_COOKIE, parse_token};

impl RouterClient {
    /// Open a session with the router's admin password.
    ///
    /// `POST /api/v1/login` with `{"password": "..."}`
    ///
    /// On success the session token is stored and private features become
    /// available. A 2xx answer without the session cookie is treated as a
    /// malformed response.
    pub async fn login(&mut self, password: &SecretString) -> Result<(), Error> {
        let url = self.authorize(Endpoint::LOGIN, auth::LOGIN)?;
        debug!("logging in at {}", url);

        let body = json!({ "password": password.expose_secret() });
        let resp = self
            .invoker
            .send(Method::POST, url, Some(&body), None)
            .await?;

        let raw = resp
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or_else(|| {
                Error::malformed(
                    format!("login succeeded but no {SESSION_COOKIE} cookie was set"),
                    "",
                )
            })?;
        let token = parse_token(&raw)?;

        self.session.open(token);
        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /api/v1/logout`
    ///
    /// The token is only dropped once the router acknowledges the logout.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let url = self.authorize(Endpoint::LOGOUT, auth::LOGOUT)?;
        debug!("logging out at {}", url);

        self.invoker
            .send(Method::POST, url, None, self.session.token())
            .await?;

        self.session.close();
        debug!("logout complete");
        Ok(())
    }
}
