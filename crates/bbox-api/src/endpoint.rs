// Endpoint descriptors and request URL construction
//
// The router serves its API under `/api/v1` on the LAN (plain HTTP) and on
// a dedicated HTTPS port from the internet. Which one applies depends only
// on the address class of the target, computed once in `TargetHost::parse`.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use url::Url;

use crate::auth::Origin;
use crate::error::Error;

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "api/v1";

/// Gateway address of a factory-configured router.
pub const DEFAULT_LOCAL_HOST: &str = "192.168.1.254";

/// HTTPS port of the remote management interface.
pub const DEFAULT_REMOTE_PORT: u16 = 8560;

/// Identifies one remote operation: `/api/v1[/{class}][/{method}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub class: Option<&'static str>,
    pub method: Option<&'static str>,
}

impl Endpoint {
    pub const fn new(class: Option<&'static str>, method: Option<&'static str>) -> Self {
        Self { class, method }
    }

    pub const DEVICE: Self = Self::new(Some("device"), None);
    pub const DEVICE_DISPLAY: Self = Self::new(Some("device"), Some("display"));
    pub const HOSTS: Self = Self::new(Some("hosts"), None);
    pub const LOGIN: Self = Self::new(Some("login"), None);
    pub const LOGOUT: Self = Self::new(Some("logout"), None);
    pub const WAN_XDSL: Self = Self::new(Some("wan"), Some("xdsl"));
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.class, self.method) {
            (Some(class), Some(method)) => write!(f, "{class}/{method}"),
            (Some(segment), None) | (None, Some(segment)) => f.write_str(segment),
            (None, None) => f.write_str("/"),
        }
    }
}

/// The router address a client is bound to.
///
/// Accepts a bare IP address or `ip:port` (`[v6]:port` for IPv6). DNS names
/// are rejected: the origin must be known without resolving anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHost {
    ip: IpAddr,
    port: Option<u16>,
    origin: Origin,
}

impl TargetHost {
    pub fn parse(host: &str) -> Result<Self, Error> {
        let host = host.trim();
        let (ip, port) = if let Ok(ip) = IpAddr::from_str(host) {
            (ip, None)
        } else if let Ok(addr) = SocketAddr::from_str(host) {
            (addr.ip(), Some(addr.port()))
        } else {
            return Err(Error::InvalidHost {
                host: host.to_owned(),
                reason: "expected an IP address, optionally followed by :port".into(),
            });
        };

        let origin = if is_private(ip) {
            Origin::Local
        } else {
            Origin::Remote
        };

        Ok(Self { ip, port, origin })
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Explicit port override, if one was given.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Full request URL for `endpoint` on this host.
    pub fn url_for(&self, endpoint: Endpoint) -> Result<Url, Error> {
        build_url(self, endpoint.class, endpoint.method)
    }

    fn authority(&self) -> String {
        let host = match self.ip {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{v6}]"),
        };
        let port = match self.origin {
            Origin::Local => self.port,
            Origin::Remote => Some(self.port.unwrap_or(DEFAULT_REMOTE_PORT)),
        };
        match port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        }
    }
}

impl Default for TargetHost {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 254)),
            port: None,
            origin: Origin::Local,
        }
    }
}

impl FromStr for TargetHost {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ip, self.port) {
            (ip, None) => write!(f, "{ip}"),
            (ip, Some(port)) => write!(f, "{}", SocketAddr::new(ip, port)),
        }
    }
}

/// Build `scheme://host[:port]/api/v1[/{class}][/{method}]` for `host`.
///
/// Local targets use `http` and no port unless one was given; remote
/// targets use `https` on [`DEFAULT_REMOTE_PORT`] unless overridden.
pub fn build_url(
    host: &TargetHost,
    class: Option<&str>,
    method: Option<&str>,
) -> Result<Url, Error> {
    let scheme = match host.origin {
        Origin::Local => "http",
        Origin::Remote => "https",
    };
    let mut full = format!("{scheme}://{}/{API_PREFIX}", host.authority());
    for segment in [class, method].into_iter().flatten() {
        full.push('/');
        full.push_str(segment);
    }
    Url::parse(&full).map_err(|e| Error::InvalidHost {
        host: host.to_string(),
        reason: format!("cannot form request URL: {e}"),
    })
}

/// Whether `ip` lives in a non-routable (LAN-side) range.
pub fn is_private(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map_or_else(|| is_private_v6(v6), is_private_v4),
    }
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    // 100.64.0.0/10 is carrier-grade NAT space
    let shared = a == 100 && (b & 0xc0) == 64;
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || shared
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    ip.is_loopback() || unique_local || link_local
}
