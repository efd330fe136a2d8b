//! Per-server adapter cache.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tracing::debug;

use remote_torrent_types::{
    AddTorrent, AddedTorrent, ClientResult, QueueMove, Server, ServerKind, SessionSettings,
    SessionStats, SessionUpdate, TorrentClient, TorrentDigest, TorrentFiles, TorrentId,
    TorrentInfo, TorrentListItem, TorrentPeers, TorrentPieces, TorrentSettings, TorrentTrackers,
    TorrentUpdate,
};

use crate::{
    config::TransportConfig, qbittorrent::QBittorrentAdapter, transmission::TransmissionAdapter,
};

/// An adapter for one server, chosen by [`Server::kind`].
#[derive(Debug)]
pub enum Client {
    /// Transmission JSON-RPC.
    Transmission(TransmissionAdapter),
    /// qBittorrent WebUI API.
    QBittorrent(QBittorrentAdapter),
}

impl Client {
    /// Builds a fresh adapter for `server`, with no negotiated session.
    pub fn new(server: &Server, config: &TransportConfig) -> ClientResult<Self> {
        Ok(match server.kind {
            ServerKind::Transmission => {
                Client::Transmission(TransmissionAdapter::new(server, config)?)
            }
            ServerKind::Qbittorrent => {
                Client::QBittorrent(QBittorrentAdapter::new(server, config)?)
            }
        })
    }

    /// The protocol this client speaks.
    pub fn kind(&self) -> ServerKind {
        match self {
            Client::Transmission(_) => ServerKind::Transmission,
            Client::QBittorrent(_) => ServerKind::Qbittorrent,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $client:ident => $call:expr) => {
        match $self {
            Client::Transmission($client) => $call.await,
            Client::QBittorrent($client) => $call.await,
        }
    };
}

impl TorrentClient for Client {
    async fn get_torrents(&self) -> ClientResult<Vec<TorrentListItem>> {
        dispatch!(self, c => c.get_torrents())
    }

    async fn get_torrent_digests(&self) -> ClientResult<Vec<TorrentDigest>> {
        dispatch!(self, c => c.get_torrent_digests())
    }

    async fn get_torrent_info(&self, id: &TorrentId) -> ClientResult<TorrentInfo> {
        dispatch!(self, c => c.get_torrent_info(id))
    }

    async fn get_torrent_settings(&self, id: &TorrentId) -> ClientResult<TorrentSettings> {
        dispatch!(self, c => c.get_torrent_settings(id))
    }

    async fn get_torrent_files(&self, id: &TorrentId) -> ClientResult<TorrentFiles> {
        dispatch!(self, c => c.get_torrent_files(id))
    }

    async fn get_torrent_peers(&self, id: &TorrentId) -> ClientResult<TorrentPeers> {
        dispatch!(self, c => c.get_torrent_peers(id))
    }

    async fn get_torrent_trackers(&self, id: &TorrentId) -> ClientResult<TorrentTrackers> {
        dispatch!(self, c => c.get_torrent_trackers(id))
    }

    async fn get_torrent_pieces(&self, id: &TorrentId) -> ClientResult<TorrentPieces> {
        dispatch!(self, c => c.get_torrent_pieces(id))
    }

    async fn add_torrent(&self, request: AddTorrent) -> ClientResult<Option<AddedTorrent>> {
        dispatch!(self, c => c.add_torrent(request))
    }

    async fn remove_torrents(
        &self,
        ids: &[TorrentId],
        delete_local_data: bool,
    ) -> ClientResult<()> {
        dispatch!(self, c => c.remove_torrents(ids, delete_local_data))
    }

    async fn start_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        dispatch!(self, c => c.start_torrents(ids))
    }

    async fn start_torrents_now(&self, ids: &[TorrentId]) -> ClientResult<()> {
        dispatch!(self, c => c.start_torrents_now(ids))
    }

    async fn stop_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        dispatch!(self, c => c.stop_torrents(ids))
    }

    async fn verify_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        dispatch!(self, c => c.verify_torrents(ids))
    }

    async fn reannounce_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        dispatch!(self, c => c.reannounce_torrents(ids))
    }

    async fn set_torrents(&self, ids: &[TorrentId], update: TorrentUpdate) -> ClientResult<()> {
        dispatch!(self, c => c.set_torrents(ids, update))
    }

    async fn set_location(
        &self,
        ids: &[TorrentId],
        location: &str,
        move_data: bool,
    ) -> ClientResult<()> {
        dispatch!(self, c => c.set_location(ids, location, move_data))
    }

    async fn move_in_queue(&self, ids: &[TorrentId], direction: QueueMove) -> ClientResult<()> {
        dispatch!(self, c => c.move_in_queue(ids, direction))
    }

    async fn get_session(&self) -> ClientResult<SessionSettings> {
        dispatch!(self, c => c.get_session())
    }

    async fn set_session(&self, update: SessionUpdate) -> ClientResult<()> {
        dispatch!(self, c => c.set_session(update))
    }

    async fn get_session_stats(&self) -> ClientResult<SessionStats> {
        dispatch!(self, c => c.get_session_stats())
    }

    async fn ping(&self) -> ClientResult<()> {
        dispatch!(self, c => c.ping())
    }
}

#[derive(Debug)]
struct CachedClient {
    updated_at: i64,
    client: Arc<Client>,
}

/// Hands out one [`Client`] per server, rebuilt only when the server record changes.
///
/// Entries are keyed by [`Server::id`] and tagged with [`Server::updated_at`], so editing
/// the URL or credentials yields a fresh transport while unchanged records share one
/// negotiated session.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    config: TransportConfig,
    clients: Mutex<HashMap<String, CachedClient>>,
}

impl ClientRegistry {
    /// Creates an empty registry with the default transport settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose clients use `config`.
    pub fn with_config(config: TransportConfig) -> Self {
        Self {
            config,
            clients: Mutex::default(),
        }
    }

    /// Returns the cached client for `server`, building one when none exists for its
    /// current `updated_at`.
    pub fn client(&self, server: &Server) -> ClientResult<Arc<Client>> {
        let mut clients = self.clients.lock();
        if let Some(cached) = clients.get(&server.id) {
            if cached.updated_at == server.updated_at {
                return Ok(Arc::clone(&cached.client));
            }
            debug!("Server {} changed, rebuilding its client", server.id);
        }
        let client = Arc::new(Client::new(server, &self.config)?);
        debug!("Created {:?} client for server {}", client.kind(), server.id);
        clients.insert(
            server.id.clone(),
            CachedClient {
                updated_at: server.updated_at,
                client: Arc::clone(&client),
            },
        );
        Ok(client)
    }

    /// Drops the cached client of a deleted server. Returns whether one existed.
    pub fn forget(&self, server_id: &str) -> bool {
        self.clients.lock().remove(server_id).is_some()
    }

    /// Number of cached clients.
    pub fn len(&self) -> usize {
        self.clients.lock().len()
    }

    /// Returns true when no client is cached.
    pub fn is_empty(&self) -> bool {
        self.clients.lock().is_empty()
    }
}
