//! Blocking client for the Netro smart irrigation public API (NPA v1).
//!
//! ```no_run
//! use netro_client::NetroClient;
//!
//! let client = NetroClient::new("YOUR_DEVICE_KEY");
//! let info = client.get_info()?;
//! for zone in info.data.device.zones(true) {
//!     println!("zone {}: {} ({})", zone.ith, zone.name, zone.smart);
//! }
//! # Ok::<(), netro_client::NetroClientError>(())
//! ```

pub mod models {
    pub mod netro;
}

pub mod client;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod request;
pub mod utils;

pub use client::NetroClient;
pub use config::ClientConfig;
pub use envelope::{Ack, Envelope, Response};
pub use error::NetroClientError;
pub use request::{ApiRequest, Endpoint, Params};
