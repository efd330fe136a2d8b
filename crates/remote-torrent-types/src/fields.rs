//! Torrent field projection.
//!
//! A [`Projection`] is a struct whose members are exactly the [`TorrentField`]s it
//! asks the daemon for, each one non-optional. Projections are declared with
//! [`torrent_projection!`](crate::torrent_projection); every member names a marker
//! type from [`field`], which fixes both the wire name and the value type, so a
//! projection can never assert a field it did not request.
//!
//! When the requested field list is only known at runtime the result is a
//! [`PartialTorrent`], where every field is optional.

use std::fmt;

use serde::Deserialize;

/// Associates a marker type with its wire field and value type.
pub trait Field {
    /// Decoded value type of the field.
    type Value;

    /// The field this marker stands for.
    const FIELD: TorrentField;

    /// Moves the field's value out of a partially decoded torrent.
    fn take(partial: &mut PartialTorrent) -> Option<Self::Value>;
}

/// A torrent shape made of a statically known set of fields.
pub trait Projection: Sized {
    /// Fields to request from the daemon.
    const FIELDS: &'static [TorrentField];

    /// Narrows a partially decoded torrent, failing if a requested field is absent.
    fn from_partial(partial: PartialTorrent) -> Result<Self, MissingField>;
}

/// A projected field was missing from the daemon's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub TorrentField);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "torrent has no field {:?}", self.0.as_str())
    }
}

impl std::error::Error for MissingField {}

impl From<MissingField> for crate::TorrentClientError {
    fn from(err: MissingField) -> Self {
        crate::TorrentClientError::Parse(err.to_string())
    }
}

macro_rules! torrent_fields {
    ($( $(#[$doc:meta])* $variant:ident => $member:ident: $ty:ty = $wire:literal, )*) => {
        /// A torrent attribute that can be requested from the daemon.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TorrentField {
            $( $(#[$doc])* $variant, )*
        }

        impl TorrentField {
            /// Every known field.
            pub const ALL: &'static [TorrentField] = &[$( TorrentField::$variant, )*];

            /// Wire name of the field.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( TorrentField::$variant => $wire, )*
                }
            }
        }

        /// A torrent decoded from an arbitrary field list; nothing is guaranteed present.
        #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
        pub struct PartialTorrent {
            $(
                $(#[$doc])*
                #[serde(rename = $wire, default)]
                pub $member: Option<$ty>,
            )*
        }

        /// Marker types naming each [`TorrentField`] for use in projections.
        pub mod field {
            $(
                $(#[$doc])*
                #[derive(Debug, Clone, Copy)]
                pub struct $variant;

                impl super::Field for $variant {
                    type Value = $ty;
                    const FIELD: super::TorrentField = super::TorrentField::$variant;

                    fn take(partial: &mut super::PartialTorrent) -> Option<Self::Value> {
                        partial.$member.take()
                    }
                }
            )*
        }
    };
}

torrent_fields! {
    /// Daemon-specific identifier.
    Id => id: crate::TorrentId = "id",
    /// Display name.
    Name => name: String = "name",
    /// Info hash, hex encoded.
    HashString => hash_string: String = "hashString",
    /// Lifecycle state.
    Status => status: crate::Status = "status",
    /// Completion in `[0, 1]`.
    PercentDone => percent_done: f64 = "percentDone",
    /// Download rate in bytes/s.
    RateDownload => rate_download: i64 = "rateDownload",
    /// Upload rate in bytes/s.
    RateUpload => rate_upload: i64 = "rateUpload",
    /// Size of all files in bytes.
    TotalSize => total_size: i64 = "totalSize",
    /// Size of the wanted files in bytes.
    SizeWhenDone => size_when_done: i64 = "sizeWhenDone",
    /// Bytes still missing from the wanted files.
    LeftUntilDone => left_until_done: i64 = "leftUntilDone",
    /// Seconds until done, `-1` when unknown.
    Eta => eta: i64 = "eta",
    /// Error code, `0` when healthy.
    Error => error: i64 = "error",
    /// Human readable error.
    ErrorString => error_string: String = "errorString",
    /// Whether seeding reached its limit.
    IsFinished => is_finished: bool = "isFinished",
    /// Whether the torrent is private.
    IsPrivate => is_private: bool = "isPrivate",
    /// Connected peers.
    PeersConnected => peers_connected: i64 = "peersConnected",
    /// Peers downloading from us.
    PeersGettingFromUs => peers_getting_from_us: i64 = "peersGettingFromUs",
    /// Peers uploading to us.
    PeersSendingToUs => peers_sending_to_us: i64 = "peersSendingToUs",
    /// Bytes uploaded over the torrent's lifetime.
    UploadedEver => uploaded_ever: i64 = "uploadedEver",
    /// Bytes downloaded over the torrent's lifetime.
    DownloadedEver => downloaded_ever: i64 = "downloadedEver",
    /// Bytes discarded as corrupt.
    CorruptEver => corrupt_ever: i64 = "corruptEver",
    /// Verified bytes on disk.
    HaveValid => have_valid: i64 = "haveValid",
    /// Upload ratio.
    UploadRatio => upload_ratio: f64 = "uploadRatio",
    /// Position in the queue.
    QueuePosition => queue_position: i64 = "queuePosition",
    /// Unix time the torrent was added.
    AddedDate => added_date: i64 = "addedDate",
    /// Unix time the download finished.
    DoneDate => done_date: i64 = "doneDate",
    /// Unix time of the last transfer.
    ActivityDate => activity_date: i64 = "activityDate",
    /// Unix time the metainfo was created.
    DateCreated => date_created: i64 = "dateCreated",
    /// Magnet URI.
    MagnetLink => magnet_link: String = "magnetLink",
    /// Directory the data lives in.
    DownloadDir => download_dir: String = "downloadDir",
    /// Metainfo comment.
    Comment => comment: String = "comment",
    /// Metainfo creator.
    Creator => creator: String = "creator",
    /// Number of pieces.
    PieceCount => piece_count: i64 = "pieceCount",
    /// Piece size in bytes.
    PieceSize => piece_size: i64 = "pieceSize",
    /// Base64 bitfield of the pieces we have.
    Pieces => pieces: String = "pieces",
    /// Files in the torrent.
    Files => files: Vec<crate::TorrentFile> = "files",
    /// Per-file progress, wanted flag and priority.
    FileStats => file_stats: Vec<crate::FileStat> = "fileStats",
    /// Connected peers.
    Peers => peers: Vec<crate::Peer> = "peers",
    /// Tracker announce and scrape state.
    TrackerStats => tracker_stats: Vec<crate::TrackerStat> = "trackerStats",
    /// Bandwidth priority.
    BandwidthPriority => bandwidth_priority: crate::Priority = "bandwidthPriority",
    /// Download limit in kB/s.
    DownloadLimit => download_limit: i64 = "downloadLimit",
    /// Whether the download limit applies.
    DownloadLimited => download_limited: bool = "downloadLimited",
    /// Upload limit in kB/s.
    UploadLimit => upload_limit: i64 = "uploadLimit",
    /// Whether the upload limit applies.
    UploadLimited => upload_limited: bool = "uploadLimited",
    /// Whether the session-wide limits also apply.
    HonorsSessionLimits => honors_session_limits: bool = "honorsSessionLimits",
    /// Seed ratio limit.
    SeedRatioLimit => seed_ratio_limit: f64 = "seedRatioLimit",
    /// How the seed ratio limit applies.
    SeedRatioMode => seed_ratio_mode: crate::Mode = "seedRatioMode",
    /// Idle seeding limit in minutes.
    SeedIdleLimit => seed_idle_limit: i64 = "seedIdleLimit",
    /// How the idle seeding limit applies.
    SeedIdleMode => seed_idle_mode: crate::Mode = "seedIdleMode",
}

/// Declares a [`Projection`] struct whose members are exactly the listed fields.
///
/// ```
/// use remote_torrent_types::{Projection, TorrentField, torrent_projection};
///
/// torrent_projection! {
///     /// Just enough to label a torrent.
///     pub struct Label {
///         id: Id,
///         name: Name,
///     }
/// }
///
/// assert_eq!(Label::FIELDS, &[TorrentField::Id, TorrentField::Name]);
/// ```
#[macro_export]
macro_rules! torrent_projection {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$member_meta:meta])* $member:ident: $marker:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$member_meta])*
                pub $member: <$crate::field::$marker as $crate::Field>::Value,
            )*
        }

        impl $crate::Projection for $name {
            const FIELDS: &'static [$crate::TorrentField] = &[
                $( <$crate::field::$marker as $crate::Field>::FIELD, )*
            ];

            fn from_partial(
                mut partial: $crate::PartialTorrent,
            ) -> ::std::result::Result<Self, $crate::MissingField> {
                Ok(Self {
                    $(
                        $member: <$crate::field::$marker as $crate::Field>::take(&mut partial)
                            .ok_or($crate::MissingField(
                                <$crate::field::$marker as $crate::Field>::FIELD,
                            ))?,
                    )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, TorrentId};

    torrent_projection! {
        struct IdAndName {
            id: Id,
            name: Name,
        }
    }

    #[test]
    fn wire_names_are_unique() {
        let mut names: Vec<&str> = TorrentField::ALL.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TorrentField::ALL.len());
    }

    #[test]
    fn projection_lists_only_requested_fields() {
        assert_eq!(IdAndName::FIELDS, &[TorrentField::Id, TorrentField::Name]);
    }

    #[test]
    fn projection_narrows_partial_torrent() {
        let partial: PartialTorrent =
            serde_json::from_str(r#"{"id": 3, "name": "debian.iso", "status": 4}"#).unwrap();
        assert_eq!(partial.status, Some(Status::Downloading));

        let narrowed = IdAndName::from_partial(partial).unwrap();
        assert_eq!(narrowed.id, TorrentId::Numeric(3));
        assert_eq!(narrowed.name, "debian.iso");
    }

    #[test]
    fn projection_reports_missing_field() {
        let partial: PartialTorrent = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        let err = IdAndName::from_partial(partial).unwrap_err();
        assert_eq!(err, MissingField(TorrentField::Name));
        assert_eq!(err.to_string(), "torrent has no field \"name\"");
    }

    #[test]
    fn partial_torrent_leaves_unrequested_fields_empty() {
        let partial: PartialTorrent =
            serde_json::from_str(r#"{"hashString": "abc", "unknownField": 1}"#).unwrap();
        assert_eq!(partial.hash_string.as_deref(), Some("abc"));
        assert!(partial.id.is_none());
        assert!(partial.files.is_none());
    }
}
