// Access policy
//
// Every router feature declares the authentication it needs, once for
// callers on the LAN and once for callers coming from the internet.
// The client evaluates the declaration before sending anything.

use std::fmt;

use crate::error::Error;

/// Where the client talks to the router from.
///
/// Fixed when the client is built: private target addresses mean the
/// caller sits on the router's LAN, anything else goes through the
/// remote (WAN) interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Private address -- plain HTTP on the LAN.
    Local,
    /// Public address -- HTTPS on the remote management port.
    Remote,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Remote => "remote",
        })
    }
}

/// Minimum authentication state a feature requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Not reachable from this origin at all.
    None,
    /// Requires a logged-in session.
    Private,
    /// Open to anyone who can reach the router.
    Public,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Private => "private",
            Self::Public => "public",
        })
    }
}

/// Access levels a feature declares for local and remote callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequirement {
    pub local: AccessLevel,
    pub remote: AccessLevel,
}

impl AccessRequirement {
    pub const fn new(local: AccessLevel, remote: AccessLevel) -> Self {
        Self { local, remote }
    }

    /// The level that applies to callers at `origin`.
    pub fn for_origin(self, origin: Origin) -> AccessLevel {
        match origin {
            Origin::Local => self.local,
            Origin::Remote => self.remote,
        }
    }

    /// Whether a caller at `origin` may make the call.
    pub fn permits(self, origin: Origin, authenticated: bool) -> bool {
        match self.for_origin(origin) {
            AccessLevel::None => false,
            AccessLevel::Private => authenticated,
            AccessLevel::Public => true,
        }
    }

    /// Guard form of [`permits`](Self::permits) for the feature methods.
    pub fn check(self, endpoint: &str, origin: Origin, authenticated: bool) -> Result<(), Error> {
        if self.permits(origin, authenticated) {
            return Ok(());
        }
        tracing::warn!(endpoint, %origin, authenticated, "call refused by access policy");
        Err(Error::AccessDenied {
            endpoint: endpoint.to_owned(),
            origin,
            required: self.for_origin(origin),
        })
    }
}

// ── Per-feature declarations ────────────────────────────────────────

pub const DEVICE_INFO: AccessRequirement =
    AccessRequirement::new(AccessLevel::Public, AccessLevel::Private);

pub const DEVICE_DISPLAY: AccessRequirement =
    AccessRequirement::new(AccessLevel::Private, AccessLevel::Private);

pub const HOSTS: AccessRequirement =
    AccessRequirement::new(AccessLevel::Public, AccessLevel::Private);

pub const LOGIN: AccessRequirement =
    AccessRequirement::new(AccessLevel::Public, AccessLevel::Public);

pub const LOGOUT: AccessRequirement =
    AccessRequirement::new(AccessLevel::Public, AccessLevel::Public);

pub const WAN_XDSL: AccessRequirement =
    AccessRequirement::new(AccessLevel::Public, AccessLevel::Private);

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINS: [Origin; 2] = [Origin::Local, Origin::Remote];

    #[test]
    fn none_is_always_denied() {
        let req = AccessRequirement::new(AccessLevel::None, AccessLevel::None);
        for origin in ORIGINS {
            assert!(!req.permits(origin, false));
            assert!(!req.permits(origin, true));
        }
    }

    #[test]
    fn public_is_always_permitted() {
        let req = AccessRequirement::new(AccessLevel::Public, AccessLevel::Public);
        for origin in ORIGINS {
            assert!(req.permits(origin, false));
            assert!(req.permits(origin, true));
        }
    }

    #[test]
    fn private_follows_session() {
        let req = AccessRequirement::new(AccessLevel::Private, AccessLevel::Private);
        for origin in ORIGINS {
            assert!(!req.permits(origin, false));
            assert!(req.permits(origin, true));
        }
    }

    #[test]
    fn origin_selects_level() {
        assert_eq!(DEVICE_INFO.for_origin(Origin::Local), AccessLevel::Public);
        assert_eq!(DEVICE_INFO.for_origin(Origin::Remote), AccessLevel::Private);
        assert!(HOSTS.permits(Origin::Local, false));
        assert!(!HOSTS.permits(Origin::Remote, false));
    }

    #[test]
    fn check_reports_required_level() {
        let err = WAN_XDSL
            .check("wan/xdsl", Origin::Remote, false)
            .expect_err("remote xdsl without session must be refused");
        match err {
            Error::AccessDenied {
                endpoint,
                origin,
                required,
            } => {
                assert_eq!(endpoint, "wan/xdsl");
                assert_eq!(origin, Origin::Remote);
                assert_eq!(required, AccessLevel::Private);
            }
            other => panic!("expected AccessDenied, got {other:?}"),
        }
        assert!(WAN_XDSL.check("wan/xdsl", Origin::Remote, true).is_ok());
    }
}
