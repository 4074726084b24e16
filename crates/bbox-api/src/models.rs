// Response models
//
// Field names follow the router's JSON exactly. Every struct keeps the
// fields it does not model in `extra`, since the set varies by firmware.
// Descriptive fields decode leniently: a value of an unexpected type
// becomes `None` instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of `GET /api/v1/hosts` (`hosts.list[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub macaddress: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ipaddress: Option<String>,
    /// Connection medium as reported by the router ("Ethernet", "Wifi 5", ...).
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub devicetype: Option<String>,
    /// 1 while the device is connected, 0 otherwise.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub active: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Host {
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

/// `GET /api/v1/wan/xdsl` (`wan.xdsl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XdslInfo {
    pub state: String,
    #[serde(default, deserialize_with = "lenient")]
    pub modulation: Option<String>,
    /// Seconds since the line trained.
    #[serde(default, deserialize_with = "lenient")]
    pub showtime: Option<u64>,
    pub up: XdslLine,
    pub down: XdslLine,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl XdslInfo {
    pub fn is_connected(&self) -> bool {
        is_connected_state(&self.state)
    }
}

pub(crate) fn is_connected_state(state: &str) -> bool {
    state == "Connected"
}

/// Per-direction line statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XdslLine {
    /// Synchronised rate in kbit/s.
    pub bitrates: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub noise: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub attenuation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub power: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl XdslLine {
    /// Synchronised rate in Mbit/s.
    pub fn mbps(&self) -> f64 {
        self.bitrates / 1000.0
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
