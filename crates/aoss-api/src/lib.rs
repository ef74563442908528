// aoss-api: Async Rust client for the Aruba AOS-S switch REST API

pub mod endpoints;
pub mod error;
pub mod models;
pub mod pacing;
pub mod session;
pub mod transport;

pub use error::Error;
pub use models::{NewVlan, PoeSettings, PortMode, Vlan, VlanPort};
pub use pacing::Pacer;
pub use session::{ApiResponse, SwitchSession};
pub use transport::{TlsMode, TransportConfig};

// Re-exported so consumers can name request methods without a direct
// reqwest dependency.
pub use reqwest::{Method, StatusCode};
