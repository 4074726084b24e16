use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "BBOX_ID";

/// Login state of a client.
///
/// Authentication is derived from the presence of the token, so the two
/// can never disagree.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<SecretString>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// `Cookie` header value for authenticated requests, e.g. `BBOX_ID=abc123`.
    pub fn cookie_header(&self) -> Option<String> {
        self.token.as_ref().map(cookie_pair)
    }

    pub(crate) fn open(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    pub(crate) fn close(&mut self) {
        self.token = None;
    }
}

/// Accept a token issued by the router only if it can be replayed as a cookie.
pub(crate) fn parse_token(raw: &str) -> Result<SecretString, Error> {
    if raw.is_empty() {
        return Err(Error::malformed(
            format!("{SESSION_COOKIE} cookie is empty"),
            "",
        ));
    }
    if HeaderValue::from_str(raw).is_err() || raw.contains([';', ',', ' ']) {
        return Err(Error::malformed(
            format!("{SESSION_COOKIE} cookie holds characters that cannot be sent back"),
            "",
        ));
    }
    Ok(SecretString::from(raw.to_owned()))
}

pub(crate) fn cookie_pair(token: &SecretString) -> String {
    format!("{SESSION_COOKIE}={}", token.expose_secret())
}
