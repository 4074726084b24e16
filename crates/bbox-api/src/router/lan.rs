// LAN endpoints: devices known to the router.

use tracing::debug;

use crate::auth;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::Host;
use crate::router::client::RouterClient;

impl RouterClient {
    /// List every device the router knows about, connected or not.
    ///
    /// `GET /api/v1/hosts` (`hosts.list`)
    pub async fn connected_devices(&self) -> Result<Vec<Host>, Error> {
        debug!("listing hosts");
        self.get_field(Endpoint::HOSTS, auth::HOSTS, &["hosts", "list"])
            .await
    }

    /// Whether the device with IP `ip` is currently connected.
    ///
    /// An address the router has never seen is simply not connected.
    pub async fn is_device_connected(&self, ip: &str) -> Result<bool, Error> {
        let hosts = self.connected_devices().await?;
        Ok(hosts
            .iter()
            .find(|h| h.ipaddress.as_deref() == Some(ip))
            .is_some_and(Host::is_active))
    }
}
