//! Wire shapes of the qBittorrent WebUI API (v2).
//!
//! Members missing from older daemons decode to their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `state` of an entry in `torrents/info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum QbState {
    Error,
    MissingFiles,
    Uploading,
    #[serde(rename = "stoppedUP")]
    StoppedUp,
    #[serde(rename = "pausedUP")]
    PausedUp,
    #[serde(rename = "queuedUP")]
    QueuedUp,
    #[serde(rename = "stalledUP")]
    StalledUp,
    #[serde(rename = "checkingUP")]
    CheckingUp,
    #[serde(rename = "forcedUP")]
    ForcedUp,
    Allocating,
    Downloading,
    #[serde(rename = "metaDL")]
    MetaDl,
    #[serde(rename = "forcedMetaDL")]
    ForcedMetaDl,
    #[serde(rename = "stoppedDL")]
    StoppedDl,
    #[serde(rename = "pausedDL")]
    PausedDl,
    #[serde(rename = "queuedDL")]
    QueuedDl,
    #[serde(rename = "stalledDL")]
    StalledDl,
    #[serde(rename = "checkingDL")]
    CheckingDl,
    #[serde(rename = "forcedDL")]
    ForcedDl,
    CheckingResumeData,
    Moving,
    /// Any state this crate does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Entry of `torrents/info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbTorrent {
    pub hash: String,
    pub name: String,
    pub state: QbState,
    pub progress: f64,
    /// Bytes/s.
    pub dlspeed: i64,
    /// Bytes/s.
    pub upspeed: i64,
    /// Size of the wanted files.
    pub size: i64,
    pub total_size: i64,
    pub amount_left: i64,
    /// Seconds, `8640000` when unknown.
    pub eta: i64,
    pub num_seeds: i64,
    pub num_leechs: i64,
    pub uploaded: i64,
    pub downloaded: i64,
    pub ratio: f64,
    /// Queue position, `0` or negative when queueing is off.
    pub priority: i64,
    pub added_on: i64,
    pub completion_on: i64,
    pub last_activity: i64,
    pub magnet_uri: String,
    pub save_path: String,
    /// Bytes/s, `0` or negative when unlimited.
    pub dl_limit: i64,
    /// Bytes/s, `0` or negative when unlimited.
    pub up_limit: i64,
    /// `-2` global, `-1` unlimited.
    pub ratio_limit: f64,
    /// Minutes; `-2` global, `-1` unlimited.
    pub seeding_time_limit: i64,
    /// Minutes; absent before WebUI API 2.9.
    pub inactive_seeding_time_limit: Option<i64>,
    pub private: Option<bool>,
}

/// Response of `torrents/properties`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbProperties {
    pub comment: String,
    pub created_by: String,
    pub creation_date: i64,
    pub pieces_num: i64,
    pub piece_size: i64,
    pub pieces_have: i64,
    pub total_wasted: i64,
    pub total_downloaded: i64,
    pub total_uploaded: i64,
    pub is_private: Option<bool>,
}

/// Entry of `torrents/files`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbFile {
    pub index: Option<i64>,
    pub name: String,
    pub size: i64,
    pub progress: f64,
    /// `0` skip, `1` normal, `6` high, `7` maximal.
    pub priority: i64,
}

/// Entry of `torrents/trackers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbTracker {
    pub url: String,
    /// `0` disabled, `1` not contacted, `2` working, `3` updating, `4` not working.
    pub status: i64,
    /// Number, or empty string for the DHT/PeX/LSD pseudo-entries.
    pub tier: Value,
    pub num_peers: i64,
    pub num_seeds: i64,
    pub num_leeches: i64,
    pub num_downloaded: i64,
    pub msg: String,
}

/// Value of the `peers` map in `sync/torrentPeers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbPeer {
    pub ip: String,
    pub port: u16,
    pub client: String,
    pub progress: f64,
    pub dl_speed: i64,
    pub up_speed: i64,
    /// Space separated libtorrent flag letters.
    pub flags: String,
}

/// Response of `sync/torrentPeers`, keyed by `ip:port`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbPeers {
    pub peers: BTreeMap<String, QbPeer>,
}

/// The subset of `app/preferences` this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbPreferences {
    /// Bytes/s, `0` when unlimited.
    pub dl_limit: i64,
    pub up_limit: i64,
    pub alt_dl_limit: i64,
    pub alt_up_limit: i64,
    pub max_ratio_enabled: bool,
    pub max_ratio: f64,
    pub max_seeding_time_enabled: bool,
    /// Minutes.
    pub max_seeding_time: i64,
    pub queueing_enabled: bool,
    pub max_active_downloads: i64,
    pub max_active_uploads: i64,
    pub dht: bool,
    pub lsd: bool,
    pub pex: bool,
    pub save_path: String,
}

/// Body of `app/setPreferences`; unset members are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct QbPreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_dl_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_up_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seeding_time_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seeding_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queueing_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_active_downloads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_active_uploads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pex: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
}

impl QbPreferencesUpdate {
    /// Returns true when nothing would be changed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response of `transfer/info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct QbTransferInfo {
    /// Bytes/s.
    pub dl_info_speed: i64,
    /// Bytes this session.
    pub dl_info_data: i64,
    pub up_info_speed: i64,
    pub up_info_data: i64,
}

/// Arguments of `torrents/setShareLimits`; qBittorrent requires all three together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QbShareLimits {
    /// Ratio limit, or a share limit sentinel.
    pub ratio_limit: f64,
    /// Seeding time limit in minutes, or a share limit sentinel.
    pub seeding_time_limit: i64,
    /// Inactive seeding time limit in minutes, or a share limit sentinel.
    pub inactive_seeding_time_limit: i64,
}

/// What `torrents/add` is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QbAddSource {
    /// Magnet or URL, sent as `urls`.
    Urls(String),
    /// Raw `.torrent` contents, sent as a `torrents` file part.
    File(Vec<u8>),
}

/// Body of `torrents/add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QbAddTorrent {
    /// Torrent to add.
    pub source: QbAddSource,
    /// Target directory; the daemon default when `None`.
    pub save_path: Option<String>,
    /// Add without starting.
    pub paused: bool,
}
