//! HTTP settings shared by both transports.

use std::{env, time::Duration};

use remote_torrent_types::{ClientResult, TorrentClientError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP settings applied to every transport built by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Per-request timeout, including the response body.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("remote-torrent/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Reads overrides from `REMOTE_TORRENT_TIMEOUT_SECS` and `REMOTE_TORRENT_USER_AGENT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: env::var("REMOTE_TORRENT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: env::var("REMOTE_TORRENT_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Builds the HTTP client both transports share the settings of.
    pub(crate) fn http_client(&self) -> ClientResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| {
                TorrentClientError::InvalidServer(format!("failed to build HTTP client: {e}"))
            })
    }
}

/// Maps a `reqwest` failure that produced no HTTP status.
pub(crate) fn network_error(err: reqwest::Error) -> TorrentClientError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("failed to connect: {err}")
    } else {
        format!("request failed: {err}")
    };
    TorrentClientError::Network(message)
}
