//! Conversions between qBittorrent wire shapes and the canonical model.
//!
//! Every mapping here is total: unknown states, priorities and sentinels land on a
//! defined canonical value instead of failing.

use base64::{Engine, prelude::BASE64_STANDARD};
use url::Url;

use remote_torrent_types::{
    FileStat, Mode, Peer, Priority, SessionSettings, SessionStats, SessionUpdate, StatsDetails,
    Status, TorrentDigest, TorrentFile, TorrentId, TorrentInfo, TorrentListItem, TorrentSettings,
    TorrentUpdate, TrackerStat,
};

use super::model::{
    QbFile, QbPeer, QbPreferences, QbPreferencesUpdate, QbProperties, QbState, QbTorrent,
    QbTracker, QbTransferInfo,
};

/// ETA qBittorrent reports when it cannot estimate one.
pub(crate) const ETA_UNKNOWN: i64 = 8_640_000;
/// Share limit sentinel: follow the global limit.
pub(crate) const LIMIT_GLOBAL: f64 = -2.0;
/// Share limit sentinel: no limit.
pub(crate) const LIMIT_NONE: f64 = -1.0;
/// Piece state meaning the piece is complete.
const PIECE_HAVE: u8 = 2;
/// File priority written for "do not download".
pub(crate) const FILE_PRIORITY_SKIP: i64 = 0;
/// File priority written for `LOW` and `NORMAL`; qBittorrent has no lower level.
pub(crate) const FILE_PRIORITY_NORMAL: i64 = 1;
/// File priority written for `HIGH`.
pub(crate) const FILE_PRIORITY_MAXIMAL: i64 = 7;

impl From<QbState> for Status {
    fn from(state: QbState) -> Self {
        match state {
            QbState::Downloading
            | QbState::ForcedDl
            | QbState::MetaDl
            | QbState::ForcedMetaDl
            | QbState::StalledDl => Status::Downloading,
            QbState::Uploading | QbState::ForcedUp | QbState::StalledUp => Status::Seeding,
            QbState::StoppedDl
            | QbState::StoppedUp
            | QbState::PausedDl
            | QbState::PausedUp
            | QbState::Error
            | QbState::MissingFiles
            | QbState::Unknown => Status::Stopped,
            QbState::QueuedDl | QbState::Allocating | QbState::Moving => Status::QueuedToDownload,
            QbState::QueuedUp => Status::QueuedToSeed,
            QbState::CheckingDl | QbState::CheckingUp | QbState::CheckingResumeData => {
                Status::VerifyingLocalData
            }
        }
    }
}

/// Reads a native file priority as `(priority, wanted)`.
pub(crate) fn file_priority(native: i64) -> (Priority, bool) {
    let priority = match native {
        6 | 7 => Priority::High,
        _ => Priority::Normal,
    };
    (priority, native != FILE_PRIORITY_SKIP)
}

/// Writes a canonical file priority; `LOW` collapses onto `NORMAL`.
pub(crate) fn native_file_priority(priority: Priority) -> i64 {
    match priority {
        Priority::High => FILE_PRIORITY_MAXIMAL,
        Priority::Normal | Priority::Low => FILE_PRIORITY_NORMAL,
    }
}

/// Reads a share limit as `(mode, value)`; the value is `0` unless the mode is `SINGLE`.
pub(crate) fn limit_mode(native: f64) -> (Mode, f64) {
    if native >= 0.0 {
        (Mode::Single, native)
    } else if (native - LIMIT_GLOBAL).abs() < f64::EPSILON {
        (Mode::Global, 0.0)
    } else {
        (Mode::Unlimited, 0.0)
    }
}

/// Computes the share limit to write, keeping `current` for whatever the update leaves unset.
pub(crate) fn merged_limit(mode: Option<Mode>, value: Option<f64>, current: f64) -> f64 {
    match (mode, value) {
        (Some(Mode::Global), _) => LIMIT_GLOBAL,
        (Some(Mode::Unlimited), _) => LIMIT_NONE,
        (Some(Mode::Single) | None, Some(value)) => value.max(0.0),
        (Some(Mode::Single), None) => current.max(0.0),
        (None, None) => current,
    }
}

/// Converts a bytes/s limit to canonical `(limited, kB/s)`.
pub(crate) fn rate_limit(bytes_per_second: i64) -> (bool, i64) {
    if bytes_per_second > 0 {
        (true, bytes_per_second / 1024)
    } else {
        (false, 0)
    }
}

/// Converts a canonical limit change to bytes/s; `0` lifts the limit.
pub(crate) fn native_rate_limit(limited: Option<bool>, kilobytes: Option<i64>) -> Option<i64> {
    match (limited, kilobytes) {
        (Some(false), _) => Some(0),
        (_, Some(kilobytes)) => Some(kilobytes.max(0) * 1024),
        (Some(true), None) | (None, None) => None,
    }
}

fn eta(native: i64) -> i64 {
    if native >= ETA_UNKNOWN { -1 } else { native }
}

fn error(state: QbState) -> (i64, String) {
    match state {
        QbState::Error => (3, "torrent error".to_owned()),
        QbState::MissingFiles => (3, "missing files".to_owned()),
        _ => (0, String::new()),
    }
}

/// qBittorrent's queue position is 1-based and `0` or negative when not queued.
fn queue_position(priority: i64) -> i64 {
    if priority > 0 { priority - 1 } else { -1 }
}

impl From<QbTorrent> for TorrentListItem {
    fn from(torrent: QbTorrent) -> Self {
        let (error, error_string) = error(torrent.state);
        Self {
            id: TorrentId::Hash(torrent.hash),
            name: torrent.name,
            status: torrent.state.into(),
            percent_done: torrent.progress,
            rate_download: torrent.dlspeed,
            rate_upload: torrent.upspeed,
            total_size: torrent.total_size,
            size_when_done: torrent.size,
            left_until_done: torrent.amount_left,
            eta: eta(torrent.eta),
            error,
            error_string,
            is_finished: matches!(torrent.state, QbState::StoppedUp | QbState::PausedUp),
            peers_connected: torrent.num_seeds + torrent.num_leechs,
            peers_getting_from_us: torrent.num_leechs,
            peers_sending_to_us: torrent.num_seeds,
            uploaded_ever: torrent.uploaded,
            upload_ratio: torrent.ratio,
            queue_position: queue_position(torrent.priority),
            added_date: torrent.added_on.max(0),
            done_date: torrent.completion_on.max(0),
            activity_date: torrent.last_activity.max(0),
            magnet_link: torrent.magnet_uri,
            download_dir: torrent.save_path,
        }
    }
}

impl From<QbTorrent> for TorrentDigest {
    fn from(torrent: QbTorrent) -> Self {
        Self {
            name: torrent.name,
            percent_done: torrent.progress,
        }
    }
}

impl From<QbTorrent> for TorrentSettings {
    fn from(torrent: QbTorrent) -> Self {
        let (download_limited, download_limit) = rate_limit(torrent.dl_limit);
        let (upload_limited, upload_limit) = rate_limit(torrent.up_limit);
        let (seed_ratio_mode, seed_ratio_limit) = limit_mode(torrent.ratio_limit);
        let (seed_idle_mode, seed_idle_limit) = limit_mode(torrent.seeding_time_limit as f64);
        Self {
            id: TorrentId::Hash(torrent.hash),
            bandwidth_priority: Priority::Normal,
            download_limit,
            download_limited,
            upload_limit,
            upload_limited,
            honors_session_limits: true,
            seed_ratio_limit,
            seed_ratio_mode,
            seed_idle_limit: seed_idle_limit as i64,
            seed_idle_mode,
        }
    }
}

pub(crate) fn torrent_info(torrent: QbTorrent, properties: QbProperties) -> TorrentInfo {
    let (error, error_string) = error(torrent.state);
    let have_valid = (properties.pieces_have * properties.piece_size)
        .min(torrent.total_size)
        .max(0);
    TorrentInfo {
        id: TorrentId::Hash(torrent.hash.clone()),
        name: torrent.name,
        hash_string: torrent.hash,
        status: torrent.state.into(),
        percent_done: torrent.progress,
        rate_download: torrent.dlspeed,
        rate_upload: torrent.upspeed,
        eta: eta(torrent.eta),
        error,
        error_string,
        total_size: torrent.total_size,
        size_when_done: torrent.size,
        left_until_done: torrent.amount_left,
        have_valid,
        downloaded_ever: properties.total_downloaded,
        uploaded_ever: properties.total_uploaded,
        corrupt_ever: properties.total_wasted,
        upload_ratio: torrent.ratio,
        peers_connected: torrent.num_seeds + torrent.num_leechs,
        piece_count: properties.pieces_num,
        piece_size: properties.piece_size,
        is_private: properties.is_private.or(torrent.private).unwrap_or(false),
        comment: properties.comment,
        creator: properties.created_by,
        date_created: properties.creation_date.max(0),
        added_date: torrent.added_on.max(0),
        done_date: torrent.completion_on.max(0),
        activity_date: torrent.last_activity.max(0),
        download_dir: torrent.save_path,
        magnet_link: torrent.magnet_uri,
    }
}

/// Splits `torrents/files` into the canonical file list and per-file stats.
pub(crate) fn files(native: Vec<QbFile>) -> (Vec<TorrentFile>, Vec<FileStat>) {
    native
        .into_iter()
        .map(|file| {
            let bytes_completed = (file.size as f64 * file.progress).round() as i64;
            let (priority, wanted) = file_priority(file.priority);
            (
                TorrentFile {
                    name: file.name,
                    length: file.size,
                    bytes_completed,
                },
                FileStat {
                    bytes_completed,
                    wanted,
                    priority,
                },
            )
        })
        .unzip()
}

impl From<QbPeer> for Peer {
    fn from(peer: QbPeer) -> Self {
        Self {
            is_encrypted: peer.flags.contains(['E', 'e']),
            is_incoming: peer.flags.contains('I'),
            flag_str: peer.flags.split_whitespace().collect(),
            address: peer.ip,
            port: peer.port,
            client_name: peer.client,
            progress: peer.progress,
            rate_to_client: peer.dl_speed,
            rate_to_peer: peer.up_speed,
        }
    }
}

fn tracker_tier(tier: &serde_json::Value) -> i64 {
    tier.as_i64()
        .or_else(|| tier.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}

/// Converts `torrents/trackers`, dropping the DHT, PeX and LSD pseudo-entries.
pub(crate) fn trackers(native: Vec<QbTracker>) -> Vec<TrackerStat> {
    native
        .into_iter()
        .filter(|tracker| !tracker.url.starts_with("** ["))
        .enumerate()
        .map(|(index, tracker)| {
            let host = Url::parse(&tracker.url)
                .ok()
                .and_then(|url| url.host_str().map(str::to_owned))
                .unwrap_or_else(|| tracker.url.clone());
            TrackerStat {
                id: index as i64,
                tier: tracker_tier(&tracker.tier),
                host,
                seeder_count: tracker.num_seeds,
                leecher_count: tracker.num_leeches,
                download_count: tracker.num_downloaded,
                last_announce_succeeded: tracker.status == 2,
                last_announce_result: tracker.msg,
                last_announce_peer_count: tracker.num_peers,
                announce: tracker.url,
            }
        })
        .collect()
}

/// Packs piece states MSB-first into a base64 bitfield, the shape Transmission reports.
pub(crate) fn pieces_bitfield(states: &[u8]) -> String {
    let mut bitfield = vec![0u8; states.len().div_ceil(8)];
    for (index, state) in states.iter().enumerate() {
        if *state == PIECE_HAVE {
            bitfield[index / 8] |= 0x80 >> (index % 8);
        }
    }
    BASE64_STANDARD.encode(bitfield)
}

pub(crate) fn session_settings(
    preferences: QbPreferences,
    alt_speed_enabled: bool,
    version: String,
) -> SessionSettings {
    let (speed_limit_down_enabled, speed_limit_down) = rate_limit(preferences.dl_limit);
    let (speed_limit_up_enabled, speed_limit_up) = rate_limit(preferences.up_limit);
    SessionSettings {
        speed_limit_down_enabled,
        speed_limit_down,
        speed_limit_up_enabled,
        speed_limit_up,
        alt_speed_enabled,
        alt_speed_down: rate_limit(preferences.alt_dl_limit).1,
        alt_speed_up: rate_limit(preferences.alt_up_limit).1,
        seed_ratio_limited: preferences.max_ratio_enabled,
        seed_ratio_limit: preferences.max_ratio,
        idle_seeding_limit_enabled: preferences.max_seeding_time_enabled,
        idle_seeding_limit: preferences.max_seeding_time,
        download_queue_enabled: preferences.queueing_enabled,
        download_queue_size: preferences.max_active_downloads,
        seed_queue_enabled: preferences.queueing_enabled,
        seed_queue_size: preferences.max_active_uploads,
        dht_enabled: preferences.dht,
        lpd_enabled: preferences.lsd,
        pex_enabled: preferences.pex,
        download_dir: preferences.save_path,
        version,
    }
}

impl From<&SessionUpdate> for QbPreferencesUpdate {
    fn from(update: &SessionUpdate) -> Self {
        Self {
            dl_limit: native_rate_limit(update.speed_limit_down_enabled, update.speed_limit_down),
            up_limit: native_rate_limit(update.speed_limit_up_enabled, update.speed_limit_up),
            alt_dl_limit: update.alt_speed_down.map(|kb| kb.max(0) * 1024),
            alt_up_limit: update.alt_speed_up.map(|kb| kb.max(0) * 1024),
            max_ratio_enabled: update.seed_ratio_limited,
            max_ratio: update.seed_ratio_limit,
            max_seeding_time_enabled: update.idle_seeding_limit_enabled,
            max_seeding_time: update.idle_seeding_limit,
            queueing_enabled: update.download_queue_enabled.or(update.seed_queue_enabled),
            max_active_downloads: update.download_queue_size,
            max_active_uploads: update.seed_queue_size,
            dht: update.dht_enabled,
            lsd: update.lpd_enabled,
            pex: update.pex_enabled,
            save_path: update.download_dir.clone(),
        }
    }
}

pub(crate) fn session_stats(transfer: QbTransferInfo, torrents: &[QbTorrent]) -> SessionStats {
    let active = torrents
        .iter()
        .filter(|t| t.dlspeed > 0 || t.upspeed > 0)
        .count();
    let paused = torrents
        .iter()
        .filter(|t| !Status::from(t.state).is_active())
        .count();
    SessionStats {
        active_torrent_count: active as i64,
        paused_torrent_count: paused as i64,
        torrent_count: torrents.len() as i64,
        download_speed: transfer.dl_info_speed,
        upload_speed: transfer.up_info_speed,
        cumulative_stats: None,
        current_stats: Some(StatsDetails {
            downloaded_bytes: transfer.dl_info_data,
            uploaded_bytes: transfer.up_info_data,
            ..Default::default()
        }),
    }
}

fn group(priority: i64, ids: impl Iterator<Item = usize>) -> Option<(i64, Vec<usize>)> {
    let mut ids: Vec<usize> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    (!ids.is_empty()).then_some((priority, ids))
}

/// File priority writes for one torrent, as `(native priority, file ids)` groups.
///
/// Files only listed as wanted keep their current priority unless they were skipped,
/// so `skipped` names the files currently at priority `0`.
pub(crate) fn file_priority_groups(
    update: &TorrentUpdate,
    skipped: &[usize],
) -> Vec<(i64, Vec<usize>)> {
    let unwanted = |id: &usize| update.files_unwanted.contains(id);
    let explicit = |id: &usize| {
        update.priority_high.contains(id)
            || update.priority_normal.contains(id)
            || update.priority_low.contains(id)
    };

    let resumed = update
        .files_wanted
        .iter()
        .filter(|&&id| skipped.contains(&id) && !explicit(&id));
    let normal = update.priority_normal.iter().chain(&update.priority_low);

    [
        group(
            native_file_priority(Priority::Normal),
            resumed.chain(normal).copied().filter(|id| !unwanted(id)),
        ),
        group(
            native_file_priority(Priority::High),
            update.priority_high.iter().copied().filter(|id| !unwanted(id)),
        ),
        group(FILE_PRIORITY_SKIP, update.files_unwanted.iter().copied()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{make_qb_files, make_qb_preferences, make_qb_properties, make_qb_torrent};

    #[test]
    fn state_mapping_matches_table() {
        let table = [
            ("downloading", Status::Downloading),
            ("forcedDL", Status::Downloading),
            ("metaDL", Status::Downloading),
            ("forcedMetaDL", Status::Downloading),
            ("stalledDL", Status::Downloading),
            ("uploading", Status::Seeding),
            ("forcedUP", Status::Seeding),
            ("stalledUP", Status::Seeding),
            ("stoppedDL", Status::Stopped),
            ("stoppedUP", Status::Stopped),
            ("pausedDL", Status::Stopped),
            ("pausedUP", Status::Stopped),
            ("error", Status::Stopped),
            ("missingFiles", Status::Stopped),
            ("unknown", Status::Stopped),
            ("queuedDL", Status::QueuedToDownload),
            ("allocating", Status::QueuedToDownload),
            ("moving", Status::QueuedToDownload),
            ("queuedUP", Status::QueuedToSeed),
            ("checkingDL", Status::VerifyingLocalData),
            ("checkingUP", Status::VerifyingLocalData),
            ("checkingResumeData", Status::VerifyingLocalData),
            ("someFutureState", Status::Stopped),
        ];
        for (wire, expected) in table {
            let state: QbState = serde_json::from_value(serde_json::json!(wire)).unwrap();
            assert_eq!(Status::from(state), expected, "state {wire}");
        }
    }

    #[test]
    fn file_priorities_round_trip_lossily() {
        assert_eq!(file_priority(0), (Priority::Normal, false));
        assert_eq!(file_priority(1), (Priority::Normal, true));
        assert_eq!(file_priority(6), (Priority::High, true));
        assert_eq!(file_priority(7), (Priority::High, true));
        assert_eq!(file_priority(4), (Priority::Normal, true));

        assert_eq!(native_file_priority(Priority::Low), native_file_priority(Priority::Normal));
        assert_eq!(native_file_priority(Priority::High), 7);
    }

    #[test]
    fn share_limit_sentinels() {
        assert_eq!(limit_mode(-2.0), (Mode::Global, 0.0));
        assert_eq!(limit_mode(-1.0), (Mode::Unlimited, 0.0));
        assert_eq!(limit_mode(-5.0), (Mode::Unlimited, 0.0));
        assert_eq!(limit_mode(0.0), (Mode::Single, 0.0));
        assert_eq!(limit_mode(1.5), (Mode::Single, 1.5));
    }

    #[test]
    fn merged_limit_keeps_unset_parts() {
        assert_eq!(merged_limit(None, None, 1.5), 1.5);
        assert_eq!(merged_limit(Some(Mode::Global), Some(3.0), 1.5), LIMIT_GLOBAL);
        assert_eq!(merged_limit(Some(Mode::Unlimited), None, 1.5), LIMIT_NONE);
        assert_eq!(merged_limit(None, Some(3.0), -2.0), 3.0);
        assert_eq!(merged_limit(Some(Mode::Single), None, -2.0), 0.0);
    }

    #[test]
    fn rate_limits_convert_units() {
        assert_eq!(rate_limit(0), (false, 0));
        assert_eq!(rate_limit(-1), (false, 0));
        assert_eq!(rate_limit(102_400), (true, 100));
        assert_eq!(native_rate_limit(Some(false), Some(100)), Some(0));
        assert_eq!(native_rate_limit(Some(true), Some(100)), Some(102_400));
        assert_eq!(native_rate_limit(None, Some(5)), Some(5120));
        assert_eq!(native_rate_limit(Some(true), None), None);
    }

    #[test]
    fn list_item_from_torrent() {
        let mut torrent = make_qb_torrent("abc", QbState::StalledDl);
        torrent.eta = ETA_UNKNOWN;
        let item = TorrentListItem::from(torrent);

        assert_eq!(item.id, TorrentId::from("abc"));
        assert_eq!(item.status, Status::Downloading);
        assert_eq!(item.eta, -1);
        assert_eq!(item.done_date, 0);
        assert_eq!(item.peers_connected, 3);
        assert_eq!(item.queue_position, 0);
        assert!(!item.is_finished);
    }

    #[test]
    fn error_states_carry_an_error_code() {
        let item = TorrentListItem::from(make_qb_torrent("abc", QbState::MissingFiles));
        assert_eq!(item.status, Status::Stopped);
        assert_eq!(item.error, 3);
        assert_eq!(item.error_string, "missing files");
    }

    #[test]
    fn settings_from_torrent() {
        let mut torrent = make_qb_torrent("abc", QbState::Uploading);
        torrent.up_limit = 51_200;
        torrent.ratio_limit = 2.0;
        torrent.seeding_time_limit = -1;
        let settings = TorrentSettings::from(torrent);

        assert!(settings.upload_limited);
        assert_eq!(settings.upload_limit, 50);
        assert!(!settings.download_limited);
        assert_eq!(settings.seed_ratio_mode, Mode::Single);
        assert_eq!(settings.seed_ratio_limit, 2.0);
        assert_eq!(settings.seed_idle_mode, Mode::Unlimited);
        assert!(settings.honors_session_limits);
    }

    #[test]
    fn info_combines_properties() {
        let info = torrent_info(make_qb_torrent("abc", QbState::Downloading), make_qb_properties());
        assert_eq!(info.hash_string, "abc");
        assert_eq!(info.have_valid, 512);
        assert_eq!(info.piece_count, 16);
        assert!(info.is_private);
        assert_eq!(info.creator, "mktorrent");
    }

    #[test]
    fn files_split_into_stats() {
        let (files, stats) = files(make_qb_files());
        assert_eq!(files[1].bytes_completed, 100);
        assert!(stats[0].wanted);
        assert!(!stats[1].wanted);
        assert_eq!(stats[1].bytes_completed, files[1].bytes_completed);
    }

    #[test]
    fn peer_flags() {
        let peer = Peer::from(QbPeer {
            ip: "10.0.0.2".into(),
            port: 6881,
            flags: "D I E".into(),
            dl_speed: 100,
            up_speed: 20,
            ..Default::default()
        });
        assert!(peer.is_encrypted);
        assert!(peer.is_incoming);
        assert_eq!(peer.flag_str, "DIE");
        assert_eq!(peer.rate_to_client, 100);
        assert_eq!(peer.rate_to_peer, 20);
    }

    #[test]
    fn trackers_drop_pseudo_entries() {
        let stats = trackers(vec![
            QbTracker {
                url: "** [DHT] **".into(),
                ..Default::default()
            },
            QbTracker {
                url: "udp://tracker.example.org:1337/announce".into(),
                status: 2,
                tier: serde_json::json!(0),
                num_seeds: 10,
                ..Default::default()
            },
        ]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].id, 0);
        assert_eq!(stats[0].host, "tracker.example.org");
        assert!(stats[0].last_announce_succeeded);
        assert_eq!(stats[0].seeder_count, 10);
    }

    #[test]
    fn pieces_pack_msb_first() {
        assert_eq!(
            pieces_bitfield(&[2, 0, 0, 0, 0, 0, 0, 0, 2]),
            BASE64_STANDARD.encode([0x80u8, 0x80])
        );
        assert_eq!(pieces_bitfield(&[2; 8]), "/w==");
        assert_eq!(pieces_bitfield(&[1, 0, 1]), "AA==");
        assert_eq!(pieces_bitfield(&[]), "");
    }

    #[test]
    fn session_settings_convert_to_kilobytes() {
        let settings = session_settings(make_qb_preferences(), true, "v5.0.0".into());
        assert!(settings.speed_limit_down_enabled);
        assert_eq!(settings.speed_limit_down, 100);
        assert!(!settings.speed_limit_up_enabled);
        assert_eq!(settings.alt_speed_down, 50);
        assert!(settings.alt_speed_enabled);
        assert_eq!(settings.version, "v5.0.0");
    }

    #[test]
    fn session_update_converts_to_bytes() {
        let update = QbPreferencesUpdate::from(&SessionUpdate {
            speed_limit_up: Some(10),
            speed_limit_down_enabled: Some(false),
            alt_speed_down: Some(20),
            seed_queue_enabled: Some(true),
            ..Default::default()
        });
        assert_eq!(update.up_limit, Some(10_240));
        assert_eq!(update.dl_limit, Some(0));
        assert_eq!(update.alt_dl_limit, Some(20_480));
        assert_eq!(update.queueing_enabled, Some(true));
        assert_eq!(update.dht, None);
    }

    #[test]
    fn file_groups_one_per_priority() {
        let update = TorrentUpdate {
            files_wanted: vec![0, 1],
            files_unwanted: vec![3],
            priority_high: vec![1, 2],
            priority_low: vec![4],
            ..Default::default()
        };
        let groups = file_priority_groups(&update, &[0, 3]);
        assert_eq!(
            groups,
            vec![
                (FILE_PRIORITY_NORMAL, vec![0, 4]),
                (FILE_PRIORITY_MAXIMAL, vec![1, 2]),
                (FILE_PRIORITY_SKIP, vec![3]),
            ]
        );
    }
}
