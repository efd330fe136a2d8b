//! Shared test utilities and fixtures.

use serde_json::{Value, json};

use crate::qbittorrent::{QbFile, QbPreferences, QbProperties, QbState, QbTorrent, QbTransferInfo};

/// A torrent as `torrent-get` returns it for the list view.
pub(crate) fn make_list_torrent(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": 4,
        "percentDone": 0.5,
        "rateDownload": 1024,
        "rateUpload": 0,
        "totalSize": 1000,
        "sizeWhenDone": 1000,
        "leftUntilDone": 500,
        "eta": 60,
        "error": 0,
        "errorString": "",
        "isFinished": false,
        "peersConnected": 3,
        "peersGettingFromUs": 0,
        "peersSendingToUs": 3,
        "uploadedEver": 0,
        "uploadRatio": 0.0,
        "queuePosition": 0,
        "addedDate": 1_700_000_000,
        "doneDate": 0,
        "activityDate": 1_700_000_100,
        "magnetLink": "magnet:?xt=urn:btih:abc",
        "downloadDir": "/downloads",
    })
}

pub(crate) fn make_session_stats() -> Value {
    json!({
        "activeTorrentCount": 1,
        "pausedTorrentCount": 2,
        "torrentCount": 3,
        "downloadSpeed": 1000,
        "uploadSpeed": 500,
        "cumulative-stats": {
            "downloadedBytes": 10, "uploadedBytes": 5, "filesAdded": 3,
            "sessionCount": 2, "secondsActive": 60
        },
        "current-stats": {
            "downloadedBytes": 1, "uploadedBytes": 1, "filesAdded": 0,
            "sessionCount": 1, "secondsActive": 5
        },
    })
}

pub(crate) fn make_qb_torrent(hash: &str, state: QbState) -> QbTorrent {
    QbTorrent {
        hash: hash.to_string(),
        name: format!("torrent-{hash}"),
        state,
        progress: 0.5,
        dlspeed: 2048,
        upspeed: 0,
        size: 1000,
        total_size: 1200,
        amount_left: 500,
        eta: 120,
        num_seeds: 2,
        num_leechs: 1,
        uploaded: 100,
        downloaded: 500,
        ratio: 0.2,
        priority: 1,
        added_on: 1_700_000_000,
        completion_on: -1,
        last_activity: 1_700_000_100,
        magnet_uri: format!("magnet:?xt=urn:btih:{hash}"),
        save_path: "/downloads".to_string(),
        dl_limit: 0,
        up_limit: 0,
        ratio_limit: -2.0,
        seeding_time_limit: -2,
        inactive_seeding_time_limit: Some(-2),
        private: Some(false),
    }
}

pub(crate) fn make_qb_properties() -> QbProperties {
    QbProperties {
        comment: "comment".to_string(),
        created_by: "mktorrent".to_string(),
        creation_date: 1_600_000_000,
        pieces_num: 16,
        piece_size: 64,
        pieces_have: 8,
        total_wasted: 0,
        total_downloaded: 512,
        total_uploaded: 100,
        is_private: Some(true),
    }
}

pub(crate) fn make_qb_files() -> Vec<QbFile> {
    vec![
        QbFile {
            index: Some(0),
            name: "a.bin".to_string(),
            size: 100,
            progress: 1.0,
            priority: 1,
        },
        QbFile {
            index: Some(1),
            name: "b.bin".to_string(),
            size: 200,
            progress: 0.5,
            priority: 0,
        },
    ]
}

pub(crate) fn make_qb_preferences() -> QbPreferences {
    QbPreferences {
        dl_limit: 102_400,
        up_limit: 0,
        alt_dl_limit: 51_200,
        alt_up_limit: 10_240,
        max_ratio_enabled: true,
        max_ratio: 2.0,
        max_seeding_time_enabled: false,
        max_seeding_time: 1440,
        queueing_enabled: true,
        max_active_downloads: 3,
        max_active_uploads: 5,
        dht: true,
        lsd: false,
        pex: true,
        save_path: "/downloads".to_string(),
    }
}

pub(crate) fn make_qb_transfer_info() -> QbTransferInfo {
    QbTransferInfo {
        dl_info_speed: 3000,
        dl_info_data: 10_000,
        up_info_speed: 1000,
        up_info_data: 4000,
    }
}
