//! Maps the canonical client interface onto Transmission RPC methods.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use remote_torrent_types::{
    AddTorrent, AddedTorrent, ClientResult, PartialTorrent, Projection, QueueMove, Server,
    SessionSettings, SessionStats, SessionUpdate, TorrentClient, TorrentClientError, TorrentDigest,
    TorrentField, TorrentFiles, TorrentId, TorrentInfo, TorrentListItem, TorrentPeers,
    TorrentPieces, TorrentSettings, TorrentSource, TorrentTrackers, TorrentUpdate,
};

use super::transport::{RpcMethod, RpcRequest, TransmissionRpc, TransmissionTransport};
use crate::config::TransportConfig;

#[cfg(test)]
mod tests;

/// Transmission implementation of [`TorrentClient`].
#[derive(Debug)]
pub struct TransmissionAdapter<T: TransmissionRpc = TransmissionTransport> {
    rpc: T,
}

impl TransmissionAdapter {
    /// Creates an adapter for `server`, whose URL is the full RPC endpoint.
    pub fn new(server: &Server, config: &TransportConfig) -> ClientResult<Self> {
        let url = Url::parse(&server.url).map_err(|e| {
            TorrentClientError::InvalidServer(format!("invalid RPC URL '{}': {e}", server.url))
        })?;
        let credentials = server
            .credentials()
            .map(|(user, password)| (user.to_owned(), password.to_owned()));
        Ok(Self {
            rpc: TransmissionTransport::new(url, credentials, config)?,
        })
    }
}

impl<T: TransmissionRpc> TransmissionAdapter<T> {
    /// Wraps an existing RPC implementation.
    pub fn with_rpc(rpc: T) -> Self {
        Self { rpc }
    }

    /// The underlying RPC implementation.
    pub fn rpc(&self) -> &T {
        &self.rpc
    }

    /// Fetches torrents as projection `P`, requesting exactly `P::FIELDS`.
    pub async fn torrents<P: Projection>(&self, ids: Option<&[TorrentId]>) -> ClientResult<Vec<P>> {
        self.torrents_with_fields(P::FIELDS, ids)
            .await?
            .into_iter()
            .map(|partial| P::from_partial(partial).map_err(Into::into))
            .collect()
    }

    /// Fetches torrents with a field list only known at runtime.
    pub async fn torrents_with_fields(
        &self,
        fields: &[TorrentField],
        ids: Option<&[TorrentId]>,
    ) -> ClientResult<Vec<PartialTorrent>> {
        #[derive(Deserialize)]
        struct TorrentGet {
            torrents: Vec<PartialTorrent>,
        }

        let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
        let mut arguments = json!({ "fields": names });
        if let Some(ids) = ids {
            arguments["ids"] = json!(ids);
        }
        let response: TorrentGet = self
            .rpc
            .request(RpcRequest::with_arguments(RpcMethod::TorrentGet, arguments))
            .await?
            .decode()?;
        Ok(response.torrents)
    }

    async fn torrent<P: Projection>(&self, id: &TorrentId) -> ClientResult<P> {
        debug!("Getting torrent {id} with {} fields", P::FIELDS.len());
        self.torrents::<P>(Some(std::slice::from_ref(id)))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TorrentClientError::TorrentNotFound(id.to_string()))
    }

    async fn call(&self, method: RpcMethod, arguments: Value) -> ClientResult<()> {
        self.rpc
            .request(RpcRequest::with_arguments(method, arguments))
            .await?;
        debug!("{method:?} sent");
        Ok(())
    }
}

/// Arguments of a `torrent-add` response; exactly one member is set.
#[derive(Deserialize)]
struct TorrentAddResult {
    #[serde(rename = "torrent-added")]
    added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate")]
    duplicate: Option<AddedTorrent>,
}

fn add_arguments(request: &AddTorrent) -> Value {
    let mut arguments = match &request.source {
        TorrentSource::Filename(filename) => json!({ "filename": filename }),
        TorrentSource::Metainfo(metainfo) => json!({ "metainfo": metainfo }),
    };
    arguments["paused"] = json!(request.paused);
    if let Some(dir) = &request.download_dir {
        arguments["download-dir"] = json!(dir);
    }
    arguments
}

fn queue_method(direction: QueueMove) -> RpcMethod {
    match direction {
        QueueMove::Top => RpcMethod::QueueMoveTop,
        QueueMove::Up => RpcMethod::QueueMoveUp,
        QueueMove::Down => RpcMethod::QueueMoveDown,
        QueueMove::Bottom => RpcMethod::QueueMoveBottom,
    }
}

impl<T: TransmissionRpc> TorrentClient for TransmissionAdapter<T> {
    async fn get_torrents(&self) -> ClientResult<Vec<TorrentListItem>> {
        debug!("Listing torrents");
        let torrents = self.torrents(None).await?;
        debug!("Listed {} torrents", torrents.len());
        Ok(torrents)
    }

    async fn get_torrent_digests(&self) -> ClientResult<Vec<TorrentDigest>> {
        self.torrents(None).await
    }

    async fn get_torrent_info(&self, id: &TorrentId) -> ClientResult<TorrentInfo> {
        self.torrent(id).await
    }

    async fn get_torrent_settings(&self, id: &TorrentId) -> ClientResult<TorrentSettings> {
        self.torrent(id).await
    }

    async fn get_torrent_files(&self, id: &TorrentId) -> ClientResult<TorrentFiles> {
        self.torrent(id).await
    }

    async fn get_torrent_peers(&self, id: &TorrentId) -> ClientResult<TorrentPeers> {
        self.torrent(id).await
    }

    async fn get_torrent_trackers(&self, id: &TorrentId) -> ClientResult<TorrentTrackers> {
        self.torrent(id).await
    }

    async fn get_torrent_pieces(&self, id: &TorrentId) -> ClientResult<TorrentPieces> {
        self.torrent(id).await
    }

    async fn add_torrent(&self, request: AddTorrent) -> ClientResult<Option<AddedTorrent>> {
        debug!("Adding torrent, paused={}", request.paused);
        let result: TorrentAddResult = self
            .rpc
            .request(RpcRequest::with_arguments(
                RpcMethod::TorrentAdd,
                add_arguments(&request),
            ))
            .await?
            .decode()?;

        let added = match (result.added, result.duplicate) {
            (Some(added), _) => added,
            (None, Some(duplicate)) => {
                debug!("Torrent {} was already present", duplicate.hash_string);
                duplicate
            }
            (None, None) => {
                return Err(TorrentClientError::Parse(
                    "torrent-add response names no torrent".into(),
                ));
            }
        };
        debug!("Added {added:?}");
        Ok(Some(added))
    }

    async fn remove_torrents(
        &self,
        ids: &[TorrentId],
        delete_local_data: bool,
    ) -> ClientResult<()> {
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        self.call(
            RpcMethod::TorrentRemove,
            json!({ "ids": ids, "delete-local-data": delete_local_data }),
        )
        .await
    }

    async fn start_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Starting torrents {ids:?}");
        self.call(RpcMethod::TorrentStart, json!({ "ids": ids })).await
    }

    async fn start_torrents_now(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Force starting torrents {ids:?}");
        self.call(RpcMethod::TorrentStartNow, json!({ "ids": ids })).await
    }

    async fn stop_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Stopping torrents {ids:?}");
        self.call(RpcMethod::TorrentStop, json!({ "ids": ids })).await
    }

    async fn verify_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Verifying torrents {ids:?}");
        self.call(RpcMethod::TorrentVerify, json!({ "ids": ids })).await
    }

    async fn reannounce_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Reannouncing torrents {ids:?}");
        self.call(RpcMethod::TorrentReannounce, json!({ "ids": ids })).await
    }

    async fn set_torrents(&self, ids: &[TorrentId], update: TorrentUpdate) -> ClientResult<()> {
        debug!("Updating torrents {ids:?} with {update:?}");
        let mut arguments = serde_json::to_value(&update)?;
        arguments["ids"] = json!(ids);
        self.call(RpcMethod::TorrentSet, arguments).await
    }

    async fn set_location(
        &self,
        ids: &[TorrentId],
        location: &str,
        move_data: bool,
    ) -> ClientResult<()> {
        debug!("Setting location of {ids:?} to {location}, move={move_data}");
        self.call(
            RpcMethod::TorrentSetLocation,
            json!({ "ids": ids, "location": location, "move": move_data }),
        )
        .await
    }

    async fn move_in_queue(&self, ids: &[TorrentId], direction: QueueMove) -> ClientResult<()> {
        debug!("Moving torrents {ids:?} {direction:?} in queue");
        self.call(queue_method(direction), json!({ "ids": ids })).await
    }

    async fn get_session(&self) -> ClientResult<SessionSettings> {
        debug!("Getting session settings");
        self.rpc
            .request(RpcRequest::new(RpcMethod::SessionGet))
            .await?
            .decode()
    }

    async fn set_session(&self, update: SessionUpdate) -> ClientResult<()> {
        debug!("Updating session with {update:?}");
        self.call(RpcMethod::SessionSet, serde_json::to_value(&update)?).await
    }

    async fn get_session_stats(&self) -> ClientResult<SessionStats> {
        debug!("Getting session statistics");
        let stats: SessionStats = self
            .rpc
            .request(RpcRequest::new(RpcMethod::SessionStats))
            .await?
            .decode()?;
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    async fn ping(&self) -> ClientResult<()> {
        self.call(RpcMethod::SessionGet, json!({ "fields": ["version"] })).await
    }
}
