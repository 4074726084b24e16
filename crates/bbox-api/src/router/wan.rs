// WAN endpoints: xDSL line status.
//
// The derived helpers decode only the fields they read, so an odd value
// elsewhere in the line statistics does not break them.

use serde_json::Value;
use tracing::debug;

use crate::auth;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::invoker::extract;
use crate::models::{XdslInfo, XdslLine, is_connected_state};
use crate::router::client::RouterClient;

impl RouterClient {
    /// Get xDSL line status and statistics.
    ///
    /// `GET /api/v1/wan/xdsl` (`wan.xdsl`)
    pub async fn xdsl_info(&self) -> Result<XdslInfo, Error> {
        let xdsl = self.xdsl_payload().await?;
        extract(&xdsl, &[])
    }

    /// Whether the xDSL line is up.
    pub async fn is_connected(&self) -> Result<bool, Error> {
        let xdsl = self.xdsl_payload().await?;
        let state: String = extract(&xdsl, &["state"])?;
        Ok(is_connected_state(&state))
    }

    /// Upstream sync rate in Mbit/s.
    pub async fn up_bitrates(&self) -> Result<f64, Error> {
        let xdsl = self.xdsl_payload().await?;
        Ok(extract::<XdslLine>(&xdsl, &["up"])?.mbps())
    }

    /// Downstream sync rate in Mbit/s.
    pub async fn down_bitrates(&self) -> Result<f64, Error> {
        let xdsl = self.xdsl_payload().await?;
        Ok(extract::<XdslLine>(&xdsl, &["down"])?.mbps())
    }

    /// Raw `wan.xdsl` object.
    async fn xdsl_payload(&self) -> Result<Value, Error> {
        debug!("fetching xdsl info");
        self.get_field(Endpoint::WAN_XDSL, auth::WAN_XDSL, &["wan", "xdsl"])
            .await
    }
}
