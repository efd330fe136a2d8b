//! qBittorrent backend.

mod adapter;
mod conversions;
mod model;
mod transport;

pub use adapter::QBittorrentAdapter;
pub use model::{
    QbAddSource, QbAddTorrent, QbFile, QbPeer, QbPeers, QbPreferences, QbPreferencesUpdate,
    QbProperties, QbShareLimits, QbState, QbTorrent, QbTracker, QbTransferInfo,
};
#[cfg(test)]
pub(crate) use transport::MockQBittorrentApi;
pub use transport::{QBittorrentApi, QBittorrentTransport, SESSION_COOKIE};
