//! Configuration for Bbox router clients.
//!
//! Layered loading (defaults, TOML file, `BBOX_*` environment), password
//! resolution, and translation into a ready `bbox_api::RouterClient`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bbox_api::{DEFAULT_LOCAL_HOST, RouterClient, TargetHost, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for router {host}")]
    NoCredentials { host: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] bbox_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Connection settings for one router.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Router address, optionally with `:port` (e.g. "192.168.1.254").
    #[serde(default = "default_host")]
    pub host: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept any certificate on the remote interface.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate for the remote interface.
    pub ca_cert: Option<PathBuf>,

    /// Admin password (plaintext -- prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the admin password.
    pub password_env: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            password: None,
            password_env: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_LOCAL_HOST.into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Check the values a client cannot be built without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        TargetHost::parse(&self.host).map_err(|e| ConfigError::Validation {
            field: "host".into(),
            reason: e.to_string(),
        })?;
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    /// Transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig::default()
            .with_tls(tls)
            .with_timeout(Duration::from_secs(self.timeout))
    }

    /// Build an anonymous client for the configured router.
    pub fn build_client(&self) -> Result<RouterClient, ConfigError> {
        self.validate()?;
        let client = RouterClient::with_transport(&self.host, &self.transport())?;
        tracing::debug!(host = %self.host, origin = %client.origin(), "client built from config");
        Ok(client)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bbox-rs", "bbox").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bbox");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BBOX_"));

    let config: Config = figment.extract()?;
    tracing::debug!(path = %path.display(), host = %config.host, "config loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the admin password from the credential chain.
///
/// 1. The environment variable named by `password_env`
/// 2. `password` (from the file or `BBOX_PASSWORD`)
pub fn resolve_password(cfg: &Config) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = cfg.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref pw) = cfg.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        host: cfg.host.clone(),
    })
}

#[cfg(test)]
mod tests {
    use bbox_api::Origin;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_target_local_gateway() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("missing.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.host, "192.168.1.254");
            assert_eq!(cfg.timeout, 30);
            assert!(!cfg.insecure);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                host = "10.0.0.1"
                timeout = 10
                "#,
            )?;
            jail.set_env("BBOX_TIMEOUT", "5");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.host, "10.0.0.1");
            assert_eq!(cfg.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn password_chain() {
        Jail::expect_with(|jail| {
            let mut cfg = Config::default();
            assert!(matches!(
                resolve_password(&cfg),
                Err(ConfigError::NoCredentials { .. })
            ));

            cfg.password = Some("from-file".into());
            assert_eq!(
                resolve_password(&cfg).map_err(|e| e.to_string())?.expose_secret(),
                "from-file"
            );

            jail.set_env("ROUTER_PW", "from-env");
            cfg.password_env = Some("ROUTER_PW".into());
            assert_eq!(
                resolve_password(&cfg).map_err(|e| e.to_string())?.expose_secret(),
                "from-env"
            );
            Ok(())
        });
    }

    #[test]
    fn bbox_password_env_fills_password() {
        Jail::expect_with(|jail| {
            jail.set_env("BBOX_PASSWORD", "s3cret");
            let cfg = load_config_from(Path::new("none.toml")).map_err(|e| e.to_string())?;
            assert_eq!(
                resolve_password(&cfg).map_err(|e| e.to_string())?.expose_secret(),
                "s3cret"
            );
            Ok(())
        });
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cfg = Config {
            host: "bbox.lan".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "host"
        ));

        let cfg = Config {
            timeout: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "timeout"
        ));
    }

    #[test]
    fn transport_follows_tls_settings() {
        let cfg = Config {
            insecure: true,
            timeout: 7,
            ..Config::default()
        };
        let transport = cfg.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(7));

        let cfg = Config {
            ca_cert: Some(PathBuf::from("/etc/bbox/ca.pem")),
            ..Config::default()
        };
        assert!(matches!(cfg.transport().tls, TlsMode::CustomCa(_)));
        assert!(matches!(Config::default().transport().tls, TlsMode::System));
    }

    #[test]
    fn builds_client_for_remote_host() {
        let cfg = Config {
            host: "31.1.1.1".into(),
            ..Config::default()
        };
        let client = cfg.build_client().expect("client");
        assert_eq!(client.origin(), Origin::Remote);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn saved_config_loads_back() {
        Jail::expect_with(|_jail| {
            let path = Path::new("nested").join("config.toml");
            let cfg = Config {
                host: "192.168.1.1".into(),
                password_env: Some("ROUTER_PW".into()),
                ..Config::default()
            };

            save_config_to(&cfg, &path).map_err(|e| e.to_string())?;
            let loaded = load_config_from(&path).map_err(|e| e.to_string())?;

            assert_eq!(loaded.host, "192.168.1.1");
            assert_eq!(loaded.password_env.as_deref(), Some("ROUTER_PW"));
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn load_config_reads_canonical_path() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            jail.set_env("BBOX_TIMEOUT", "12");

            let path = config_path();
            assert!(path.starts_with(jail.directory()));
            std::fs::create_dir_all(path.parent().ok_or_else(|| "config path has no parent".to_string())?)
                .map_err(|e| e.to_string())?;
            std::fs::write(&path, "host = \"10.0.0.2\"\n").map_err(|e| e.to_string())?;

            let cfg = load_config().map_err(|e| e.to_string())?;
            assert_eq!(cfg.host, "10.0.0.2");
            assert_eq!(cfg.timeout, 12);
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn load_config_reports_broken_file() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);

            let path = config_path();
            std::fs::create_dir_all(path.parent().ok_or_else(|| "config path has no parent".to_string())?)
                .map_err(|e| e.to_string())?;
            std::fs::write(&path, "timeout = \"soon\"\n").map_err(|e| e.to_string())?;

            assert!(matches!(load_config(), Err(ConfigError::Figment(_))));
            Ok(())
        });
    }
}
