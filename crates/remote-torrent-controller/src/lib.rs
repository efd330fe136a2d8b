//! # Remote torrent controller for Transmission and qBittorrent.
//!
//! usage:
//!
//! ```rust,ignore
//! use remote_torrent_controller::ClientRegistry;
//! use remote_torrent_types::{Server, ServerKind, TorrentClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ClientRegistry::new();
//!     let server = Server {
//!         id: "home".into(),
//!         url: "http://localhost:9091/transmission/rpc".into(),
//!         kind: ServerKind::Transmission,
//!         username: None,
//!         password: None,
//!         updated_at: 0,
//!     };
//!     let client = registry.client(&server)?;
//!     for torrent in client.get_torrents().await? {
//!         println!("{} {:.0}%", torrent.name, torrent.percent_done * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!

mod config;
pub mod qbittorrent;
mod registry;
pub mod transmission;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use {futures as _, httpmock as _, test_log as _, tracing_subscriber as _};

pub use config::{DEFAULT_TIMEOUT, TransportConfig};
pub use qbittorrent::QBittorrentAdapter;
pub use registry::{Client, ClientRegistry};
pub use transmission::TransmissionAdapter;
