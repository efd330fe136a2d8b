//! # Remote Torrent Types
//!
//! Backend-agnostic model and client trait for controlling remote torrent daemons.
//! Transmission and qBittorrent adapters both normalize into these types.

mod error;
mod fields;
mod model;
pub mod optimistic;
mod server;
mod status;
mod views;

pub use error::{ClientResult, FailureKind, TorrentClientError};
pub use fields::{Field, MissingField, PartialTorrent, Projection, TorrentField, field};
pub use model::{
    AddTorrent, AddedTorrent, FileStat, Peer, QueueMove, SessionSettings, SessionStats,
    SessionUpdate, StatsDetails, TorrentFile, TorrentId, TorrentSource, TorrentUpdate,
    TrackerStat,
};
pub use server::{Server, ServerKind};
pub use status::{Mode, Priority, Status};
pub use views::{
    TorrentDigest, TorrentFiles, TorrentInfo, TorrentListItem, TorrentPeers, TorrentPieces,
    TorrentSettings, TorrentTrackers,
};

/// Common interface implemented by every daemon adapter.
#[allow(async_fn_in_trait)]
pub trait TorrentClient {
    /// List all torrents with the fields the torrent list shows.
    async fn get_torrents(&self) -> ClientResult<Vec<TorrentListItem>>;
    /// List all torrents with only their name and completion, for background checks.
    async fn get_torrent_digests(&self) -> ClientResult<Vec<TorrentDigest>>;
    /// Overview of one torrent.
    async fn get_torrent_info(&self, id: &TorrentId) -> ClientResult<TorrentInfo>;
    /// Bandwidth and seeding limits of one torrent.
    async fn get_torrent_settings(&self, id: &TorrentId) -> ClientResult<TorrentSettings>;
    /// Files of one torrent.
    async fn get_torrent_files(&self, id: &TorrentId) -> ClientResult<TorrentFiles>;
    /// Peers of one torrent.
    async fn get_torrent_peers(&self, id: &TorrentId) -> ClientResult<TorrentPeers>;
    /// Trackers of one torrent.
    async fn get_torrent_trackers(&self, id: &TorrentId) -> ClientResult<TorrentTrackers>;
    /// Piece bitfield of one torrent.
    async fn get_torrent_pieces(&self, id: &TorrentId) -> ClientResult<TorrentPieces>;
    /// Add a torrent. Returns `None` when the daemon does not report what it created.
    async fn add_torrent(&self, request: AddTorrent) -> ClientResult<Option<AddedTorrent>>;
    /// Remove torrents, optionally deleting their data.
    async fn remove_torrents(&self, ids: &[TorrentId], delete_local_data: bool)
    -> ClientResult<()>;
    /// Start torrents, honouring the queue.
    async fn start_torrents(&self, ids: &[TorrentId]) -> ClientResult<()>;
    /// Start torrents immediately, bypassing the queue.
    async fn start_torrents_now(&self, ids: &[TorrentId]) -> ClientResult<()>;
    /// Stop torrents.
    async fn stop_torrents(&self, ids: &[TorrentId]) -> ClientResult<()>;
    /// Verify local data of torrents.
    async fn verify_torrents(&self, ids: &[TorrentId]) -> ClientResult<()>;
    /// Ask trackers for more peers.
    async fn reannounce_torrents(&self, ids: &[TorrentId]) -> ClientResult<()>;
    /// Change per-torrent settings.
    async fn set_torrents(&self, ids: &[TorrentId], update: TorrentUpdate) -> ClientResult<()>;
    /// Point torrents at a new location, moving the data when `move_data` is set.
    async fn set_location(
        &self,
        ids: &[TorrentId],
        location: &str,
        move_data: bool,
    ) -> ClientResult<()>;
    /// Reorder torrents in the queue.
    async fn move_in_queue(&self, ids: &[TorrentId], direction: QueueMove) -> ClientResult<()>;
    /// Read global preferences.
    async fn get_session(&self) -> ClientResult<SessionSettings>;
    /// Change global preferences.
    async fn set_session(&self, update: SessionUpdate) -> ClientResult<()>;
    /// Read aggregate statistics.
    async fn get_session_stats(&self) -> ClientResult<SessionStats>;
    /// Check that the daemon is reachable and accepts our credentials.
    async fn ping(&self) -> ClientResult<()>;
}
