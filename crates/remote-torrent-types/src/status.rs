//! Canonical status, priority and limit-mode enums.
//!
//! The discriminants equal Transmission's wire integers, so Transmission values map
//! by identity; other backends map into these through total functions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Status {
    /// Not transferring.
    Stopped = 0,
    /// Waiting for a local data check.
    QueuedToVerifyLocalData = 1,
    /// Checking local data.
    VerifyingLocalData = 2,
    /// Waiting for a download slot.
    QueuedToDownload = 3,
    /// Downloading.
    Downloading = 4,
    /// Waiting for a seed slot.
    QueuedToSeed = 5,
    /// Seeding.
    Seeding = 6,
}

impl Status {
    /// Every status, in wire order.
    pub const ALL: [Status; 7] = [
        Status::Stopped,
        Status::QueuedToVerifyLocalData,
        Status::VerifyingLocalData,
        Status::QueuedToDownload,
        Status::Downloading,
        Status::QueuedToSeed,
        Status::Seeding,
    ];

    /// Returns true while the torrent holds or waits for a transfer slot.
    pub fn is_active(self) -> bool {
        !matches!(self, Status::Stopped)
    }
}

impl TryFrom<i64> for Status {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Status::ALL
            .into_iter()
            .find(|status| *status as i64 == value)
            .ok_or_else(|| format!("unknown torrent status {value}"))
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        status as i64
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Stopped => "stopped",
            Status::QueuedToVerifyLocalData => "queued to verify",
            Status::VerifyingLocalData => "verifying",
            Status::QueuedToDownload => "queued to download",
            Status::Downloading => "downloading",
            Status::QueuedToSeed => "queued to seed",
            Status::Seeding => "seeding",
        };
        f.write_str(label)
    }
}

/// Bandwidth or file priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    /// Low priority.
    Low = -1,
    /// Normal priority.
    #[default]
    Normal = 0,
    /// High priority.
    High = 1,
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Priority::Low),
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::High),
            other => Err(format!("unknown priority {other}")),
        }
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        priority as i64
    }
}

/// How a seed-ratio or idle-seeding limit is applied to a torrent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Mode {
    /// Follow the session-wide limit.
    #[default]
    Global = 0,
    /// Use the torrent's own limit.
    Single = 1,
    /// Never stop seeding.
    Unlimited = 2,
}

impl TryFrom<i64> for Mode {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Global),
            1 => Ok(Mode::Single),
            2 => Ok(Mode::Unlimited),
            other => Err(format!("unknown limit mode {other}")),
        }
    }
}

impl From<Mode> for i64 {
    fn from(mode: Mode) -> Self {
        mode as i64
    }
}
