// Router client façade
//
// Owns the target host, the session and the invoker. Feature methods live
// in sibling files (account, device, lan, wan) as inherent methods so this
// module stays focused on the shared guard and request plumbing.

use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{AccessRequirement, Origin};
use crate::endpoint::{Endpoint, TargetHost};
use crate::error::Error;
use crate::invoker::ApiInvoker;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Client for one router's management API.
///
/// The origin (local or remote) is fixed at construction from the target
/// address. Every feature call checks the access policy first and fails
/// with [`Error::AccessDenied`] without touching the network when the
/// current session is not enough.
#[derive(Debug)]
pub struct RouterClient {
    pub(crate) invoker: ApiInvoker,
    target: TargetHost,
    pub(crate) session: Session,
}

impl RouterClient {
    /// Create a client for `host` with default transport settings.
    ///
    /// `host` is an IP address, optionally with `:port`.
    pub fn new(host: &str) -> Result<Self, Error> {
        Self::with_transport(host, &TransportConfig::default())
    }

    /// Create a client for the factory gateway address (`192.168.1.254`).
    pub fn local() -> Result<Self, Error> {
        let http = TransportConfig::default().build_client()?;
        Ok(Self::with_client(http, TargetHost::default()))
    }

    /// Create a client for `host` using the given transport settings.
    pub fn with_transport(host: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let target = TargetHost::parse(host)?;
        let http = transport.build_client()?;
        Ok(Self::with_client(http, target))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, target: TargetHost) -> Self {
        tracing::debug!(%target, origin = %target.origin(), "router client created");
        Self {
            invoker: ApiInvoker::new(http),
            target,
            session: Session::default(),
        }
    }

    pub fn target(&self) -> &TargetHost {
        &self.target
    }

    /// Whether calls go over the LAN or the remote interface.
    pub fn origin(&self) -> Origin {
        self.target.origin()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Run the access policy for `endpoint`, then build its URL.
    pub(crate) fn authorize(
        &self,
        endpoint: Endpoint,
        required: AccessRequirement,
    ) -> Result<Url, Error> {
        required.check(
            &endpoint.to_string(),
            self.origin(),
            self.session.is_authenticated(),
        )?;
        self.target.url_for(endpoint)
    }

    /// Guarded GET that decodes the payload field at `path`.
    pub(crate) async fn get_field<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        required: AccessRequirement,
        path: &[&str],
    ) -> Result<T, Error> {
        let url = self.authorize(endpoint, required)?;
        self.invoker
            .execute_as(Method::GET, url, None, self.session.token(), path)
            .await
    }
}
