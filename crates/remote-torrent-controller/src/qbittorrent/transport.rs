//! qBittorrent WebUI API client with cookie login.

use std::fmt;

use parking_lot::RwLock;
use reqwest::{
    RequestBuilder, StatusCode,
    header::{COOKIE, HeaderMap, REFERER, SET_COOKIE},
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use remote_torrent_types::{ClientResult, QueueMove, TorrentClientError};

use super::model::{
    QbAddSource, QbAddTorrent, QbFile, QbPeers, QbPreferences, QbPreferencesUpdate, QbProperties,
    QbShareLimits, QbTorrent, QbTracker, QbTransferInfo,
};
use crate::config::{TransportConfig, network_error};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "SID";

/// A request is sent at most this many times: once, plus one replay after re-login.
const MAX_ATTEMPTS: usize = 2;

/// Seam between the adapter and the WebUI API, mocked in adapter tests.
///
/// Each method maps to one endpoint. Hash lists are sent pipe-joined.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait QBittorrentApi {
    /// `app/version`.
    async fn version(&self) -> ClientResult<String>;
    /// `app/preferences`.
    async fn preferences(&self) -> ClientResult<QbPreferences>;
    /// `app/setPreferences`.
    async fn set_preferences(&self, update: QbPreferencesUpdate) -> ClientResult<()>;
    /// `torrents/info`, optionally restricted to `hashes`.
    async fn info(&self, hashes: Option<Vec<String>>) -> ClientResult<Vec<QbTorrent>>;
    /// `torrents/properties`.
    async fn properties(&self, hash: &str) -> ClientResult<QbProperties>;
    /// `torrents/files`.
    async fn files(&self, hash: &str) -> ClientResult<Vec<QbFile>>;
    /// `torrents/trackers`.
    async fn trackers(&self, hash: &str) -> ClientResult<Vec<QbTracker>>;
    /// `torrents/pieceStates`.
    async fn piece_states(&self, hash: &str) -> ClientResult<Vec<u8>>;
    /// `sync/torrentPeers` from revision zero.
    async fn peers(&self, hash: &str) -> ClientResult<QbPeers>;
    /// `torrents/add`; returns the raw body, `"Ok."` or `"Fails."`.
    async fn add(&self, request: QbAddTorrent) -> ClientResult<String>;
    /// `torrents/delete`.
    async fn delete(&self, hashes: Vec<String>, delete_files: bool) -> ClientResult<()>;
    /// `torrents/start`.
    async fn start(&self, hashes: Vec<String>) -> ClientResult<()>;
    /// `torrents/stop`.
    async fn stop(&self, hashes: Vec<String>) -> ClientResult<()>;
    /// `torrents/setForceStart`.
    async fn set_force_start(&self, hashes: Vec<String>, value: bool) -> ClientResult<()>;
    /// `torrents/recheck`.
    async fn recheck(&self, hashes: Vec<String>) -> ClientResult<()>;
    /// `torrents/reannounce`.
    async fn reannounce(&self, hashes: Vec<String>) -> ClientResult<()>;
    /// `torrents/setDownloadLimit`, bytes/s.
    async fn set_download_limit(&self, hashes: Vec<String>, limit: i64) -> ClientResult<()>;
    /// `torrents/setUploadLimit`, bytes/s.
    async fn set_upload_limit(&self, hashes: Vec<String>, limit: i64) -> ClientResult<()>;
    /// `torrents/filePrio` for one group of files.
    async fn set_file_priority(&self, hash: &str, ids: Vec<usize>, priority: i64)
    -> ClientResult<()>;
    /// `torrents/setShareLimits`.
    async fn set_share_limits(&self, hashes: Vec<String>, limits: QbShareLimits)
    -> ClientResult<()>;
    /// `torrents/setLocation`.
    async fn set_location(&self, hashes: Vec<String>, location: &str) -> ClientResult<()>;
    /// `torrents/topPrio`, `increasePrio`, `decreasePrio` or `bottomPrio`.
    async fn move_priority(&self, hashes: Vec<String>, direction: QueueMove) -> ClientResult<()>;
    /// `transfer/info`.
    async fn transfer_info(&self) -> ClientResult<QbTransferInfo>;
    /// `transfer/speedLimitsMode`; true while alternative limits are active.
    async fn speed_limits_mode(&self) -> ClientResult<bool>;
    /// `transfer/toggleSpeedLimitsMode`.
    async fn toggle_speed_limits_mode(&self) -> ClientResult<()>;
}

/// A response body, parsed as JSON when it is JSON.
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text),
        }
    }

    fn json<R: DeserializeOwned>(self) -> ClientResult<R> {
        match self {
            Body::Json(value) => Ok(serde_json::from_value(value)?),
            Body::Text(text) => Err(TorrentClientError::Parse(format!(
                "expected a JSON body, got {text:?}"
            ))),
        }
    }

    fn text(self) -> String {
        match self {
            Body::Json(Value::String(text)) | Body::Text(text) => text,
            Body::Json(value) => value.to_string(),
        }
    }
}

fn join(values: &[String]) -> String {
    values.join("|")
}

fn metainfo_part(bytes: &[u8]) -> ClientResult<Part> {
    Part::bytes(bytes.to_vec())
        .file_name("upload.torrent")
        .mime_str("application/x-bittorrent")
        .map_err(|e| TorrentClientError::Parse(format!("invalid metainfo part: {e}")))
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_owned)
        })
}

fn status_error(status: StatusCode) -> TorrentClientError {
    TorrentClientError::http(status.as_u16(), status.canonical_reason().unwrap_or_default())
}

/// HTTP transport for the qBittorrent WebUI API.
///
/// The `SID` cookie is the only mutable state. Logging in is single-flight: while no
/// cookie is held, one caller logs in and the others wait for its outcome. Without
/// credentials no login is attempted, for daemons that whitelist the client.
pub struct QBittorrentTransport {
    http: reqwest::Client,
    base: Url,
    credentials: Option<(String, String)>,
    sid: RwLock<Option<String>>,
    login: Mutex<()>,
}

impl QBittorrentTransport {
    /// Creates a transport for the WebUI rooted at `base`.
    pub fn new(
        mut base: Url,
        credentials: Option<(String, String)>,
        config: &TransportConfig,
    ) -> ClientResult<Self> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        debug!("Creating qBittorrent transport for {}", base);
        Ok(Self {
            http: config.http_client()?,
            base,
            credentials,
            sid: RwLock::new(None),
            login: Mutex::new(()),
        })
    }

    /// Starts from a cookie obtained earlier instead of logging in on first use.
    pub fn with_session(self, sid: impl Into<String>) -> Self {
        *self.sid.write() = Some(sid.into());
        self
    }

    /// The `SID` cookie currently held.
    pub fn session(&self) -> Option<String> {
        self.sid.read().clone()
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| TorrentClientError::InvalidServer(format!("invalid endpoint {path}: {e}")))
    }

    /// Clears the cookie unless another caller already replaced it.
    fn expire(&self, stale: &str) {
        let mut sid = self.sid.write();
        if sid.as_deref() == Some(stale) {
            *sid = None;
        }
    }

    async fn log_in(&self, username: &str, password: &str) -> ClientResult<String> {
        debug!("Logging in to qBittorrent as {username}");
        let response = self
            .http
            .post(self.endpoint("api/v2/auth/login")?)
            .header(REFERER, self.base.as_str())
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let sid = session_cookie(response.headers());
        let body = response.text().await.map_err(network_error)?;
        if body != "Ok." {
            warn!("qBittorrent rejected the login");
            return Err(TorrentClientError::QBittorrentAuth("invalid credentials".into()));
        }
        let sid = sid.ok_or_else(|| {
            TorrentClientError::QBittorrentAuth("login response did not set a SID cookie".into())
        })?;

        *self.sid.write() = Some(sid.clone());
        debug!("Logged in to qBittorrent");
        Ok(sid)
    }

    /// Returns the cookie to send, logging in first if none is held.
    async fn current_session(&self) -> ClientResult<Option<String>> {
        let Some((username, password)) = &self.credentials else {
            return Ok(None);
        };
        if let Some(sid) = self.session() {
            return Ok(Some(sid));
        }

        let _login = self.login.lock().await;
        if let Some(sid) = self.session() {
            return Ok(Some(sid));
        }
        self.log_in(username, password).await.map(Some)
    }

    /// Sends the request `build` produces, logging in again and replaying once on 403.
    async fn send<F>(&self, build: F) -> ClientResult<Body>
    where
        F: Fn(&reqwest::Client) -> ClientResult<RequestBuilder>,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            let sid = self.current_session().await?;
            let mut request = build(&self.http)?.header(REFERER, self.base.as_str());
            if let Some(sid) = &sid {
                request = request.header(COOKIE, format!("{SESSION_COOKIE}={sid}"));
            }
            let response = request.send().await.map_err(network_error)?;
            let status = response.status();

            if status == StatusCode::FORBIDDEN {
                let Some(sid) = sid else {
                    return Err(status_error(status));
                };
                self.expire(&sid);
                if attempt == MAX_ATTEMPTS {
                    warn!("qBittorrent rejected a fresh session cookie");
                    break;
                }
                debug!("qBittorrent session expired, logging in again");
                continue;
            }
            if !status.is_success() {
                return Err(status_error(status));
            }

            let text = response.text().await.map_err(network_error)?;
            return Ok(Body::parse(text));
        }

        Err(status_error(StatusCode::FORBIDDEN))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Body> {
        let url = self.endpoint(path)?;
        self.send(|http| Ok(http.get(url.clone()).query(query))).await
    }

    async fn post(&self, path: &str, form: &[(&str, String)]) -> ClientResult<Body> {
        let url = self.endpoint(path)?;
        self.send(|http| Ok(http.post(url.clone()).form(form))).await
    }

    async fn post_hashes(&self, path: &str, hashes: &[String]) -> ClientResult<()> {
        self.post(path, &[("hashes", join(hashes))]).await?;
        Ok(())
    }
}

impl QBittorrentApi for QBittorrentTransport {
    async fn version(&self) -> ClientResult<String> {
        Ok(self.get("api/v2/app/version", &[]).await?.text())
    }

    async fn preferences(&self) -> ClientResult<QbPreferences> {
        self.get("api/v2/app/preferences", &[]).await?.json()
    }

    async fn set_preferences(&self, update: QbPreferencesUpdate) -> ClientResult<()> {
        let json = serde_json::to_string(&update)?;
        self.post("api/v2/app/setPreferences", &[("json", json)]).await?;
        Ok(())
    }

    async fn info(&self, hashes: Option<Vec<String>>) -> ClientResult<Vec<QbTorrent>> {
        // An empty `hashes` filter is ignored by the daemon.
        if hashes.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, String)> = hashes
            .map(|hashes| vec![("hashes", join(&hashes))])
            .unwrap_or_default();
        self.get("api/v2/torrents/info", &query).await?.json()
    }

    async fn properties(&self, hash: &str) -> ClientResult<QbProperties> {
        self.get("api/v2/torrents/properties", &[("hash", hash.to_owned())])
            .await?
            .json()
    }

    async fn files(&self, hash: &str) -> ClientResult<Vec<QbFile>> {
        self.get("api/v2/torrents/files", &[("hash", hash.to_owned())])
            .await?
            .json()
    }

    async fn trackers(&self, hash: &str) -> ClientResult<Vec<QbTracker>> {
        self.get("api/v2/torrents/trackers", &[("hash", hash.to_owned())])
            .await?
            .json()
    }

    async fn piece_states(&self, hash: &str) -> ClientResult<Vec<u8>> {
        self.get("api/v2/torrents/pieceStates", &[("hash", hash.to_owned())])
            .await?
            .json()
    }

    async fn peers(&self, hash: &str) -> ClientResult<QbPeers> {
        self.get(
            "api/v2/sync/torrentPeers",
            &[("hash", hash.to_owned()), ("rid", "0".to_owned())],
        )
        .await?
        .json()
    }

    async fn add(&self, request: QbAddTorrent) -> ClientResult<String> {
        let url = self.endpoint("api/v2/torrents/add")?;
        let body = self
            .send(|http| {
                let paused = request.paused.to_string();
                let mut form = Form::new()
                    .text("paused", paused.clone())
                    .text("stopped", paused);
                if let Some(path) = &request.save_path {
                    form = form.text("savepath", path.clone());
                }
                form = match &request.source {
                    QbAddSource::Urls(urls) => form.text("urls", urls.clone()),
                    QbAddSource::File(bytes) => form.part("torrents", metainfo_part(bytes)?),
                };
                Ok(http.post(url.clone()).multipart(form))
            })
            .await?;
        Ok(body.text())
    }

    async fn delete(&self, hashes: Vec<String>, delete_files: bool) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/delete",
            &[
                ("hashes", join(&hashes)),
                ("deleteFiles", delete_files.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn start(&self, hashes: Vec<String>) -> ClientResult<()> {
        self.post_hashes("api/v2/torrents/start", &hashes).await
    }

    async fn stop(&self, hashes: Vec<String>) -> ClientResult<()> {
        self.post_hashes("api/v2/torrents/stop", &hashes).await
    }

    async fn set_force_start(&self, hashes: Vec<String>, value: bool) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/setForceStart",
            &[("hashes", join(&hashes)), ("value", value.to_string())],
        )
        .await?;
        Ok(())
    }

    async fn recheck(&self, hashes: Vec<String>) -> ClientResult<()> {
        self.post_hashes("api/v2/torrents/recheck", &hashes).await
    }

    async fn reannounce(&self, hashes: Vec<String>) -> ClientResult<()> {
        self.post_hashes("api/v2/torrents/reannounce", &hashes).await
    }

    async fn set_download_limit(&self, hashes: Vec<String>, limit: i64) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/setDownloadLimit",
            &[("hashes", join(&hashes)), ("limit", limit.to_string())],
        )
        .await?;
        Ok(())
    }

    async fn set_upload_limit(&self, hashes: Vec<String>, limit: i64) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/setUploadLimit",
            &[("hashes", join(&hashes)), ("limit", limit.to_string())],
        )
        .await?;
        Ok(())
    }

    async fn set_file_priority(
        &self,
        hash: &str,
        ids: Vec<usize>,
        priority: i64,
    ) -> ClientResult<()> {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        self.post(
            "api/v2/torrents/filePrio",
            &[
                ("hash", hash.to_owned()),
                ("id", join(&ids)),
                ("priority", priority.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn set_share_limits(
        &self,
        hashes: Vec<String>,
        limits: QbShareLimits,
    ) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/setShareLimits",
            &[
                ("hashes", join(&hashes)),
                ("ratioLimit", limits.ratio_limit.to_string()),
                ("seedingTimeLimit", limits.seeding_time_limit.to_string()),
                (
                    "inactiveSeedingTimeLimit",
                    limits.inactive_seeding_time_limit.to_string(),
                ),
            ],
        )
        .await?;
        Ok(())
    }

    async fn set_location(&self, hashes: Vec<String>, location: &str) -> ClientResult<()> {
        self.post(
            "api/v2/torrents/setLocation",
            &[("hashes", join(&hashes)), ("location", location.to_owned())],
        )
        .await?;
        Ok(())
    }

    async fn move_priority(&self, hashes: Vec<String>, direction: QueueMove) -> ClientResult<()> {
        let path = match direction {
            QueueMove::Top => "api/v2/torrents/topPrio",
            QueueMove::Up => "api/v2/torrents/increasePrio",
            QueueMove::Down => "api/v2/torrents/decreasePrio",
            QueueMove::Bottom => "api/v2/torrents/bottomPrio",
        };
        self.post_hashes(path, &hashes).await
    }

    async fn transfer_info(&self) -> ClientResult<QbTransferInfo> {
        self.get("api/v2/transfer/info", &[]).await?.json()
    }

    async fn speed_limits_mode(&self) -> ClientResult<bool> {
        Ok(self.get("api/v2/transfer/speedLimitsMode", &[]).await?.text() == "1")
    }

    async fn toggle_speed_limits_mode(&self) -> ClientResult<()> {
        self.post("api/v2/transfer/toggleSpeedLimitsMode", &[]).await?;
        Ok(())
    }
}

impl fmt::Debug for QBittorrentTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QBittorrentTransport")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.credentials.is_some())
            .field("has_session", &self.sid.read().is_some())
            .finish()
    }
}
