// Router API façade: one inherent method per router feature, grouped by
// API class.

pub mod account;
pub mod client;
pub mod device;
pub mod lan;
pub mod wan;

pub use client::RouterClient;
