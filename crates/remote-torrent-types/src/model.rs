//! Canonical entities shared by every backend.
//!
//! Field names and units follow Transmission's RPC, which doubles as the canonical
//! shape: speeds are bytes/s, limits are kB/s, dates are unix seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Mode, Priority};

/// Daemon-specific torrent identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Transmission's numeric id.
    Numeric(i64),
    /// Info hash, used by qBittorrent (Transmission accepts it too).
    Hash(String),
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorrentId::Numeric(id) => write!(f, "{id}"),
            TorrentId::Hash(hash) => f.write_str(hash),
        }
    }
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        TorrentId::Numeric(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        TorrentId::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        TorrentId::Hash(hash)
    }
}

/// A file inside a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub name: String,
    pub length: i64,
    pub bytes_completed: i64,
}

/// Per-file transfer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FileStat {
    pub bytes_completed: i64,
    pub wanted: bool,
    pub priority: Priority,
}

/// A connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,
    pub port: u16,
    pub client_name: String,
    pub flag_str: String,
    pub is_encrypted: bool,
    pub is_incoming: bool,
    /// Peer completion in `[0, 1]`.
    pub progress: f64,
    /// Bytes/s received from this peer.
    pub rate_to_client: i64,
    /// Bytes/s sent to this peer.
    pub rate_to_peer: i64,
}

/// Announce and scrape state of one tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub id: i64,
    pub announce: String,
    pub host: String,
    pub tier: i64,
    /// `-1` when the tracker did not report it.
    pub seeder_count: i64,
    pub leecher_count: i64,
    pub download_count: i64,
    pub last_announce_succeeded: bool,
    pub last_announce_result: String,
    pub last_announce_peer_count: i64,
}

/// Where the torrent to add comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// A magnet URI or a URL/path the daemon can fetch itself.
    Filename(String),
    /// Base64-encoded `.torrent` contents.
    Metainfo(String),
}

/// Request to add a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTorrent {
    /// Magnet, URL or metainfo.
    pub source: TorrentSource,
    /// Target directory; the daemon default when `None`.
    pub download_dir: Option<String>,
    /// Add without starting.
    pub paused: bool,
}

/// Torrent created (or found duplicate) by an add request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AddedTorrent {
    pub id: TorrentId,
    pub name: String,
    pub hash_string: String,
}

/// Per-torrent settings to change; unset members are left untouched.
///
/// File indices refer to positions in the torrent's file list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<Priority>,
    /// Download limit in kB/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limited: Option<bool>,
    /// Upload limit in kB/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honors_session_limits: Option<bool>,
    #[serde(rename = "files-wanted", skip_serializing_if = "Vec::is_empty")]
    pub files_wanted: Vec<usize>,
    #[serde(rename = "files-unwanted", skip_serializing_if = "Vec::is_empty")]
    pub files_unwanted: Vec<usize>,
    #[serde(rename = "priority-high", skip_serializing_if = "Vec::is_empty")]
    pub priority_high: Vec<usize>,
    #[serde(rename = "priority-normal", skip_serializing_if = "Vec::is_empty")]
    pub priority_normal: Vec<usize>,
    #[serde(rename = "priority-low", skip_serializing_if = "Vec::is_empty")]
    pub priority_low: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_mode: Option<Mode>,
    /// Idle seeding limit in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_mode: Option<Mode>,
}

impl TorrentUpdate {
    /// Returns true when the update touches file selection or file priorities.
    pub fn touches_files(&self) -> bool {
        !(self.files_wanted.is_empty()
            && self.files_unwanted.is_empty()
            && self.priority_high.is_empty()
            && self.priority_normal.is_empty()
            && self.priority_low.is_empty())
    }

    /// Returns true when the update touches ratio or idle seeding limits.
    pub fn touches_seed_limits(&self) -> bool {
        self.seed_ratio_limit.is_some()
            || self.seed_ratio_mode.is_some()
            || self.seed_idle_limit.is_some()
            || self.seed_idle_mode.is_some()
    }
}

/// Queue reordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueMove {
    /// Move to the front of the queue.
    Top,
    /// Move one position forward.
    Up,
    /// Move one position back.
    Down,
    /// Move to the back of the queue.
    Bottom,
}

/// Global daemon preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[allow(missing_docs)]
pub struct SessionSettings {
    pub speed_limit_down_enabled: bool,
    /// kB/s.
    pub speed_limit_down: i64,
    pub speed_limit_up_enabled: bool,
    /// kB/s.
    pub speed_limit_up: i64,
    pub alt_speed_enabled: bool,
    /// kB/s.
    pub alt_speed_down: i64,
    /// kB/s.
    pub alt_speed_up: i64,
    #[serde(rename = "seedRatioLimited")]
    pub seed_ratio_limited: bool,
    #[serde(rename = "seedRatioLimit")]
    pub seed_ratio_limit: f64,
    pub idle_seeding_limit_enabled: bool,
    /// Minutes.
    pub idle_seeding_limit: i64,
    pub download_queue_enabled: bool,
    pub download_queue_size: i64,
    pub seed_queue_enabled: bool,
    pub seed_queue_size: i64,
    pub dht_enabled: bool,
    pub lpd_enabled: bool,
    pub pex_enabled: bool,
    pub download_dir: String,
    /// Daemon version string.
    pub version: String,
}

/// Global daemon preferences to change; unset members are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_down: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_up: Option<i64>,
    #[serde(rename = "seedRatioLimited", skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limited: Option<bool>,
    #[serde(rename = "seedRatioLimit", skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_seeding_limit_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_seeding_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_queue_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_queue_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpd_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pex_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

/// Aggregate transfer statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SessionStats {
    pub active_torrent_count: i64,
    pub paused_torrent_count: i64,
    pub torrent_count: i64,
    /// Bytes/s.
    pub download_speed: i64,
    /// Bytes/s.
    pub upload_speed: i64,
    /// Totals since the daemon's statistics were reset.
    #[serde(rename = "cumulative-stats", default)]
    pub cumulative_stats: Option<StatsDetails>,
    /// Totals for the running daemon session.
    #[serde(rename = "current-stats", default)]
    pub current_stats: Option<StatsDetails>,
}

/// Transfer counters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,
    pub uploaded_bytes: i64,
    pub files_added: i64,
    pub session_count: i64,
    pub seconds_active: i64,
}
