//! Fixed field sets, one per screen that shows torrent data.

use crate::torrent_projection;

torrent_projection! {
    /// A row of the torrent list.
    pub struct TorrentListItem {
        id: Id,
        name: Name,
        status: Status,
        percent_done: PercentDone,
        rate_download: RateDownload,
        rate_upload: RateUpload,
        total_size: TotalSize,
        size_when_done: SizeWhenDone,
        left_until_done: LeftUntilDone,
        eta: Eta,
        error: Error,
        error_string: ErrorString,
        is_finished: IsFinished,
        peers_connected: PeersConnected,
        peers_getting_from_us: PeersGettingFromUs,
        peers_sending_to_us: PeersSendingToUs,
        uploaded_ever: UploadedEver,
        upload_ratio: UploadRatio,
        queue_position: QueuePosition,
        added_date: AddedDate,
        done_date: DoneDate,
        activity_date: ActivityDate,
        magnet_link: MagnetLink,
        download_dir: DownloadDir,
    }
}

torrent_projection! {
    /// The two fields background completion checks poll for.
    pub struct TorrentDigest {
        name: Name,
        percent_done: PercentDone,
    }
}

torrent_projection! {
    /// Overview of a single torrent.
    pub struct TorrentInfo {
        id: Id,
        name: Name,
        hash_string: HashString,
        status: Status,
        percent_done: PercentDone,
        rate_download: RateDownload,
        rate_upload: RateUpload,
        eta: Eta,
        error: Error,
        error_string: ErrorString,
        total_size: TotalSize,
        size_when_done: SizeWhenDone,
        left_until_done: LeftUntilDone,
        have_valid: HaveValid,
        downloaded_ever: DownloadedEver,
        uploaded_ever: UploadedEver,
        corrupt_ever: CorruptEver,
        upload_ratio: UploadRatio,
        peers_connected: PeersConnected,
        piece_count: PieceCount,
        piece_size: PieceSize,
        is_private: IsPrivate,
        comment: Comment,
        creator: Creator,
        date_created: DateCreated,
        added_date: AddedDate,
        done_date: DoneDate,
        activity_date: ActivityDate,
        download_dir: DownloadDir,
        magnet_link: MagnetLink,
    }
}

torrent_projection! {
    /// Bandwidth and seeding limits of a single torrent.
    pub struct TorrentSettings {
        id: Id,
        bandwidth_priority: BandwidthPriority,
        download_limit: DownloadLimit,
        download_limited: DownloadLimited,
        upload_limit: UploadLimit,
        upload_limited: UploadLimited,
        honors_session_limits: HonorsSessionLimits,
        seed_ratio_limit: SeedRatioLimit,
        seed_ratio_mode: SeedRatioMode,
        seed_idle_limit: SeedIdleLimit,
        seed_idle_mode: SeedIdleMode,
    }
}

torrent_projection! {
    /// Files of a single torrent and their transfer settings.
    pub struct TorrentFiles {
        id: Id,
        files: Files,
        file_stats: FileStats,
    }
}

torrent_projection! {
    /// Peers connected for a single torrent.
    pub struct TorrentPeers {
        id: Id,
        peers: Peers,
    }
}

torrent_projection! {
    /// Trackers of a single torrent.
    pub struct TorrentTrackers {
        id: Id,
        tracker_stats: TrackerStats,
    }
}

torrent_projection! {
    /// Piece availability of a single torrent.
    pub struct TorrentPieces {
        id: Id,
        pieces: Pieces,
        piece_count: PieceCount,
        piece_size: PieceSize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PartialTorrent, Projection, TorrentField, TorrentId};

    #[test]
    fn digest_requests_two_fields() {
        assert_eq!(
            TorrentDigest::FIELDS,
            &[TorrentField::Name, TorrentField::PercentDone]
        );
    }

    #[test]
    fn views_start_with_id() {
        for fields in [
            TorrentListItem::FIELDS,
            TorrentInfo::FIELDS,
            TorrentSettings::FIELDS,
            TorrentFiles::FIELDS,
            TorrentPeers::FIELDS,
            TorrentTrackers::FIELDS,
            TorrentPieces::FIELDS,
        ] {
            assert_eq!(fields[0], TorrentField::Id);
        }
    }

    #[test]
    fn pieces_view_decodes() {
        let partial: PartialTorrent = serde_json::from_str(
            r#"{"id": 1, "pieces": "/w==", "pieceCount": 8, "pieceSize": 16384}"#,
        )
        .unwrap();
        let pieces = TorrentPieces::from_partial(partial).unwrap();
        assert_eq!(pieces.id, TorrentId::Numeric(1));
        assert_eq!(pieces.pieces, "/w==");
        assert_eq!(pieces.piece_count, 8);
    }
}
