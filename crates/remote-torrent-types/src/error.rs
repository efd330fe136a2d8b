//! Error vocabulary shared by both transports and adapters.

use thiserror::Error;

/// Error type for torrent client operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TorrentClientError {
    /// The daemon answered with a non-success HTTP status, including a renegotiation
    /// that was still rejected after its single retry.
    #[error("http error {status}: {message}")]
    Http {
        /// HTTP status code returned by the daemon.
        status: u16,
        /// Status text or response body.
        message: String,
    },

    /// The request never produced an HTTP response (connect failure, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// Transmission answered with an RPC `result` other than `success`.
    #[error("transmission error: {0}")]
    Transmission(String),

    /// qBittorrent reported a failed operation.
    #[error("qbittorrent error: {0}")]
    QBittorrent(String),

    /// qBittorrent refused the login or did not issue a session cookie.
    #[error("qbittorrent login failed: {0}")]
    QBittorrentAuth(String),

    /// The response body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A detail query returned no torrent for the requested id.
    #[error("torrent not found: {0}")]
    TorrentNotFound(String),

    /// The server record could not be turned into a transport.
    #[error("invalid server configuration: {0}")]
    InvalidServer(String),
}

/// Convenience alias for torrent client results.
pub type ClientResult<T> = Result<T, TorrentClientError>;

/// Coarse classification used to pick a remediation for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The host could not be reached or failed at the HTTP level.
    Unreachable,
    /// The daemon was reached but refused the request.
    Rejected,
    /// Credentials are missing or wrong.
    Unauthorized,
}

impl TorrentClientError {
    /// Builds an [`TorrentClientError::Http`] error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classifies the error for user-facing remediation.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http {
                status: 401 | 403, ..
            }
            | Self::QBittorrentAuth(_) => FailureKind::Unauthorized,
            Self::Http { status, .. } if (400..500).contains(status) => FailureKind::Rejected,
            Self::Http { .. } | Self::Network(_) | Self::InvalidServer(_) => {
                FailureKind::Unreachable
            }
            Self::Transmission(_)
            | Self::QBittorrent(_)
            | Self::Parse(_)
            | Self::TorrentNotFound(_) => FailureKind::Rejected,
        }
    }
}

impl From<serde_json::Error> for TorrentClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
