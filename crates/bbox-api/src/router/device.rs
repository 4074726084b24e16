// Device endpoints: router identity and front-panel display.

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use crate::auth;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::router::client::RouterClient;

impl RouterClient {
    /// Get router information (model, firmware, uptime, ...).
    ///
    /// `GET /api/v1/device`
    ///
    /// Returns loosely-typed JSON because the field set varies by
    /// model and firmware version.
    pub async fn device_info(&self) -> Result<serde_json::Value, Error> {
        let url = self.authorize(Endpoint::DEVICE, auth::DEVICE_INFO)?;
        debug!("fetching device info");
        self.invoker
            .execute(Method::GET, url, None, self.session.token())
            .await
    }

    /// Set the front-panel display brightness, 0 (off) to 100.
    ///
    /// `PUT /api/v1/device/display` with `{"luminosity": N}`
    pub async fn set_display_brightness(&self, luminosity: i32) -> Result<(), Error> {
        if !(0..=100).contains(&luminosity) {
            return Err(Error::InvalidArgument {
                field: "luminosity",
                reason: format!("must be between 0 and 100, got {luminosity}"),
            });
        }
        let url = self.authorize(Endpoint::DEVICE_DISPLAY, auth::DEVICE_DISPLAY)?;
        debug!(luminosity, "setting display brightness");
        let body = json!({ "luminosity": luminosity });
        self.invoker
            .send(Method::PUT, url, Some(&body), self.session.token())
            .await?;
        Ok(())
    }
}
