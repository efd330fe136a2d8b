//! Maps the canonical client interface onto qBittorrent WebUI endpoints.

use base64::{Engine, prelude::BASE64_STANDARD};
use tracing::debug;
use url::Url;

use remote_torrent_types::{
    AddTorrent, AddedTorrent, ClientResult, Peer, QueueMove, Server, SessionSettings,
    SessionStats, SessionUpdate, TorrentClient, TorrentClientError, TorrentDigest, TorrentFiles,
    TorrentId, TorrentInfo, TorrentListItem, TorrentPeers, TorrentPieces, TorrentSettings,
    TorrentSource, TorrentTrackers, TorrentUpdate,
};

use super::conversions::{
    FILE_PRIORITY_SKIP, file_priority_groups, files, merged_limit, native_rate_limit,
    pieces_bitfield, session_settings, session_stats, torrent_info, trackers,
};
use super::model::{QbAddSource, QbAddTorrent, QbPreferencesUpdate, QbShareLimits, QbTorrent};
use super::transport::{QBittorrentApi, QBittorrentTransport};
use crate::config::TransportConfig;


/// Body `torrents/add` answers with when it rejected the torrent.
const ADD_FAILED: &str = "Fails.";

/// qBittorrent implementation of [`TorrentClient`].
///
/// qBittorrent identifies torrents by info hash only, so every id passed in must be a
/// [`TorrentId::Hash`].
#[derive(Debug)]
pub struct QBittorrentAdapter<T: QBittorrentApi = QBittorrentTransport> {
    api: T,
}

impl QBittorrentAdapter {
    /// Creates an adapter for `server`, whose URL is the WebUI root.
    pub fn new(server: &Server, config: &TransportConfig) -> ClientResult<Self> {
        let url = Url::parse(&server.url).map_err(|e| {
            TorrentClientError::InvalidServer(format!("invalid WebUI URL '{}': {e}", server.url))
        })?;
        let credentials = server
            .credentials()
            .map(|(user, password)| (user.to_owned(), password.to_owned()));
        Ok(Self {
            api: QBittorrentTransport::new(url, credentials, config)?,
        })
    }
}

fn hash(id: &TorrentId) -> ClientResult<String> {
    match id {
        TorrentId::Hash(hash) => Ok(hash.clone()),
        TorrentId::Numeric(id) => Err(TorrentClientError::QBittorrent(format!(
            "torrents are identified by hash, got numeric id {id}"
        ))),
    }
}

fn hashes(ids: &[TorrentId]) -> ClientResult<Vec<String>> {
    ids.iter().map(hash).collect()
}

impl<T: QBittorrentApi> QBittorrentAdapter<T> {
    /// Wraps an existing API implementation.
    pub fn with_api(api: T) -> Self {
        Self { api }
    }

    /// The underlying API implementation.
    pub fn api(&self) -> &T {
        &self.api
    }

    async fn torrent(&self, id: &TorrentId) -> ClientResult<QbTorrent> {
        let hash = hash(id)?;
        self.api
            .info(Some(vec![hash]))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TorrentClientError::TorrentNotFound(id.to_string()))
    }

    async fn set_file_priorities(
        &self,
        hashes: &[String],
        update: &TorrentUpdate,
    ) -> ClientResult<()> {
        for hash in hashes {
            let skipped: Vec<usize> = if update.files_wanted.is_empty() {
                Vec::new()
            } else {
                self.api
                    .files(hash)
                    .await?
                    .iter()
                    .enumerate()
                    .filter(|(_, file)| file.priority == FILE_PRIORITY_SKIP)
                    .map(|(position, file)| {
                        file.index.map_or(position, |index| index.max(0) as usize)
                    })
                    .collect()
            };
            for (priority, ids) in file_priority_groups(update, &skipped) {
                debug!("Setting priority {priority} on files {ids:?} of {hash}");
                self.api.set_file_priority(hash, ids, priority).await?;
            }
        }
        Ok(())
    }

    async fn set_share_limits(
        &self,
        hashes: Vec<String>,
        update: &TorrentUpdate,
    ) -> ClientResult<()> {
        for torrent in self.api.info(Some(hashes)).await? {
            let limits = QbShareLimits {
                ratio_limit: merged_limit(
                    update.seed_ratio_mode,
                    update.seed_ratio_limit,
                    torrent.ratio_limit,
                ),
                seeding_time_limit: merged_limit(
                    update.seed_idle_mode,
                    update.seed_idle_limit.map(|minutes| minutes as f64),
                    torrent.seeding_time_limit as f64,
                ) as i64,
                inactive_seeding_time_limit: torrent.inactive_seeding_time_limit.unwrap_or(-2),
            };
            debug!("Setting share limits {limits:?} on {}", torrent.hash);
            self.api.set_share_limits(vec![torrent.hash], limits).await?;
        }
        Ok(())
    }
}

impl<T: QBittorrentApi> TorrentClient for QBittorrentAdapter<T> {
    async fn get_torrents(&self) -> ClientResult<Vec<TorrentListItem>> {
        debug!("Listing torrents");
        let torrents: Vec<TorrentListItem> = self
            .api
            .info(None)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        debug!("Listed {} torrents", torrents.len());
        Ok(torrents)
    }

    async fn get_torrent_digests(&self) -> ClientResult<Vec<TorrentDigest>> {
        Ok(self
            .api
            .info(None)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn get_torrent_info(&self, id: &TorrentId) -> ClientResult<TorrentInfo> {
        debug!("Getting info for {id}");
        let torrent = self.torrent(id).await?;
        let properties = self.api.properties(&torrent.hash).await?;
        Ok(torrent_info(torrent, properties))
    }

    async fn get_torrent_settings(&self, id: &TorrentId) -> ClientResult<TorrentSettings> {
        debug!("Getting settings for {id}");
        Ok(self.torrent(id).await?.into())
    }

    async fn get_torrent_files(&self, id: &TorrentId) -> ClientResult<TorrentFiles> {
        debug!("Getting files for {id}");
        let (files, file_stats) = files(self.api.files(&hash(id)?).await?);
        Ok(TorrentFiles {
            id: id.clone(),
            files,
            file_stats,
        })
    }

    async fn get_torrent_peers(&self, id: &TorrentId) -> ClientResult<TorrentPeers> {
        debug!("Getting peers for {id}");
        let peers = self.api.peers(&hash(id)?).await?;
        Ok(TorrentPeers {
            id: id.clone(),
            peers: peers.peers.into_values().map(Peer::from).collect(),
        })
    }

    async fn get_torrent_trackers(&self, id: &TorrentId) -> ClientResult<TorrentTrackers> {
        debug!("Getting trackers for {id}");
        let tracker_stats = trackers(self.api.trackers(&hash(id)?).await?);
        Ok(TorrentTrackers {
            id: id.clone(),
            tracker_stats,
        })
    }

    async fn get_torrent_pieces(&self, id: &TorrentId) -> ClientResult<TorrentPieces> {
        debug!("Getting pieces for {id}");
        let hash = hash(id)?;
        let properties = self.api.properties(&hash).await?;
        let states = self.api.piece_states(&hash).await?;
        Ok(TorrentPieces {
            id: id.clone(),
            pieces: pieces_bitfield(&states),
            piece_count: properties.pieces_num,
            piece_size: properties.piece_size,
        })
    }

    async fn add_torrent(&self, request: AddTorrent) -> ClientResult<Option<AddedTorrent>> {
        debug!("Adding torrent, paused={}", request.paused);
        let source = match request.source {
            TorrentSource::Filename(urls) => QbAddSource::Urls(urls),
            TorrentSource::Metainfo(metainfo) => {
                QbAddSource::File(BASE64_STANDARD.decode(metainfo.trim()).map_err(|e| {
                    TorrentClientError::Parse(format!("metainfo is not base64: {e}"))
                })?)
            }
        };
        let body = self
            .api
            .add(QbAddTorrent {
                source,
                save_path: request.download_dir,
                paused: request.paused,
            })
            .await?;
        if body.trim() == ADD_FAILED {
            return Err(TorrentClientError::QBittorrent("failed to add torrent".into()));
        }
        // The add endpoint reports no id for what it created.
        debug!("Torrent added");
        Ok(None)
    }

    async fn remove_torrents(
        &self,
        ids: &[TorrentId],
        delete_local_data: bool,
    ) -> ClientResult<()> {
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        self.api.delete(hashes(ids)?, delete_local_data).await?;
        debug!("Remove command sent");
        Ok(())
    }

    async fn start_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Starting torrents {ids:?}");
        self.api.start(hashes(ids)?).await
    }

    async fn start_torrents_now(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Force starting torrents {ids:?}");
        self.api.set_force_start(hashes(ids)?, true).await
    }

    async fn stop_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Stopping torrents {ids:?}");
        self.api.stop(hashes(ids)?).await
    }

    async fn verify_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Verifying torrents {ids:?}");
        self.api.recheck(hashes(ids)?).await
    }

    async fn reannounce_torrents(&self, ids: &[TorrentId]) -> ClientResult<()> {
        debug!("Reannouncing torrents {ids:?}");
        self.api.reannounce(hashes(ids)?).await
    }

    async fn set_torrents(&self, ids: &[TorrentId], update: TorrentUpdate) -> ClientResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!("Updating torrents {ids:?} with {update:?}");
        let hashes = hashes(ids)?;

        if let Some(limit) = native_rate_limit(update.download_limited, update.download_limit) {
            self.api.set_download_limit(hashes.clone(), limit).await?;
        }
        if let Some(limit) = native_rate_limit(update.upload_limited, update.upload_limit) {
            self.api.set_upload_limit(hashes.clone(), limit).await?;
        }
        if update.touches_files() {
            self.set_file_priorities(&hashes, &update).await?;
        }
        if update.touches_seed_limits() {
            self.set_share_limits(hashes, &update).await?;
        }
        if update.bandwidth_priority.is_some() || update.honors_session_limits.is_some() {
            debug!("Ignoring bandwidth priority and session limit flags, qBittorrent has neither");
        }
        Ok(())
    }

    async fn set_location(
        &self,
        ids: &[TorrentId],
        location: &str,
        move_data: bool,
    ) -> ClientResult<()> {
        if !move_data {
            debug!("qBittorrent always moves data when relocating");
        }
        debug!("Setting location of {ids:?} to {location}");
        self.api.set_location(hashes(ids)?, location).await
    }

    async fn move_in_queue(&self, ids: &[TorrentId], direction: QueueMove) -> ClientResult<()> {
        debug!("Moving torrents {ids:?} {direction:?} in queue");
        self.api.move_priority(hashes(ids)?, direction).await
    }

    async fn get_session(&self) -> ClientResult<SessionSettings> {
        debug!("Getting session settings");
        let preferences = self.api.preferences().await?;
        let alt_speed_enabled = self.api.speed_limits_mode().await?;
        let version = self.api.version().await?;
        Ok(session_settings(preferences, alt_speed_enabled, version))
    }

    async fn set_session(&self, update: SessionUpdate) -> ClientResult<()> {
        debug!("Updating session with {update:?}");
        let preferences = QbPreferencesUpdate::from(&update);
        if !preferences.is_empty() {
            self.api.set_preferences(preferences).await?;
        }
        if let Some(enabled) = update.alt_speed_enabled {
            if self.api.speed_limits_mode().await? != enabled {
                self.api.toggle_speed_limits_mode().await?;
            }
        }
        Ok(())
    }

    async fn get_session_stats(&self) -> ClientResult<SessionStats> {
        debug!("Getting session statistics");
        let transfer = self.api.transfer_info().await?;
        let torrents = self.api.info(None).await?;
        let stats = session_stats(transfer, &torrents);
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    async fn ping(&self) -> ClientResult<()> {
        let version = self.api.version().await?;
        debug!("qBittorrent {version} is reachable");
        Ok(())
    }
}
