// Single-request HTTP invoker
//
// One call in, one HTTP round trip out. The router wraps every payload in
// a one-element JSON array; `execute` strips it so callers only ever see
// the inner object.

use reqwest::Method;
use reqwest::header::{COOKIE, HeaderValue};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::session::cookie_pair;

/// Issues requests against the router and decodes its responses.
#[derive(Debug, Clone)]
pub struct ApiInvoker {
    http: reqwest::Client,
}

impl ApiInvoker {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send one request and check its status, leaving the body unread.
    ///
    /// `body` is serialized as JSON for POST/PUT and ignored for GET.
    /// The session token, when present, travels as the session cookie.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, Error> {
        debug!("{method} {url}");
        let attempted = url.to_string();

        let mut builder = self.http.request(method.clone(), url);
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&cookie_pair(token)).map_err(|e| {
                Error::malformed(format!("session token is not a valid cookie: {e}"), "")
            })?;
            value.set_sensitive(true);
            builder = builder.header(COOKIE, value);
        }
        if let Some(body) = body.filter(|_| method != Method::GET) {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::ApiCallFailed {
                status: status.as_u16(),
                url: attempted,
            });
        }
        Ok(resp)
    }

    /// Send one request and return the unwrapped JSON payload.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> Result<Value, Error> {
        let resp = self.send(method, url, body, token).await?;
        let text = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = text.len(), "response received");
        unwrap_payload(&text)
    }

    /// Like [`execute`](Self::execute), then decode the field at `path`.
    ///
    /// `path` walks nested objects, e.g. `&["hosts", "list"]`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        token: Option<&SecretString>,
        path: &[&str],
    ) -> Result<T, Error> {
        let payload = self.execute(method, url, body, token).await?;
        extract(&payload, path)
    }
}

/// Strip the single-element array the router wraps payloads in.
pub(crate) fn unwrap_payload(body: &str) -> Result<Value, Error> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("invalid JSON: {e}"), body))?;
    match value {
        Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
        Value::Array(_) => Err(Error::malformed("empty response array", body)),
        _ => Err(Error::malformed("expected a JSON array", body)),
    }
}

/// Decode the value found by walking `path` through nested objects.
pub(crate) fn extract<T: DeserializeOwned>(payload: &Value, path: &[&str]) -> Result<T, Error> {
    let field = if path.is_empty() {
        "payload".to_owned()
    } else {
        path.join(".")
    };
    let mut node = payload;
    for key in path {
        node = node.get(*key).ok_or_else(|| {
            Error::malformed(format!("missing field `{field}`"), &payload.to_string())
        })?;
    }
    T::deserialize(node)
        .map_err(|e| Error::malformed(format!("unexpected `{field}`: {e}"), &payload.to_string()))
}
