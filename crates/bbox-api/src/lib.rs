// bbox-api: Async Rust client for the Bbox router management API

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod invoker;
pub mod models;
pub mod router;
pub mod session;
pub mod transport;

pub use auth::{AccessLevel, AccessRequirement, Origin};
pub use endpoint::{DEFAULT_LOCAL_HOST, DEFAULT_REMOTE_PORT, Endpoint, TargetHost, build_url};
pub use error::Error;
pub use invoker::ApiInvoker;
pub use models::{Host, XdslInfo, XdslLine};
pub use router::RouterClient;
pub use session::{SESSION_COOKIE, Session};
pub use transport::{TlsMode, TransportConfig};
