//! JSON-RPC over HTTP with `X-Transmission-Session-Id` negotiation.

use std::fmt;

use parking_lot::RwLock;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use remote_torrent_types::{ClientResult, TorrentClientError};

use crate::config::{TransportConfig, network_error};

/// Header carrying the session token in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// A request is sent at most this many times: once, plus one replay after renegotiation.
const MAX_ATTEMPTS: usize = 2;

/// RPC methods used by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum RpcMethod {
    TorrentGet,
    TorrentAdd,
    TorrentRemove,
    TorrentStart,
    TorrentStartNow,
    TorrentStop,
    TorrentVerify,
    TorrentReannounce,
    TorrentSet,
    TorrentSetLocation,
    QueueMoveTop,
    QueueMoveUp,
    QueueMoveDown,
    QueueMoveBottom,
    SessionGet,
    SessionSet,
    SessionStats,
}

/// Request envelope: `{method, arguments?, tag?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    /// Method to invoke.
    pub method: RpcMethod,
    /// Method arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
    /// Echoed back by the daemon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u64>,
}

impl RpcRequest {
    /// A request without arguments.
    pub fn new(method: RpcMethod) -> Self {
        Self {
            method,
            arguments: None,
            tag: None,
        }
    }

    /// A request with the given arguments.
    pub fn with_arguments(method: RpcMethod, arguments: Value) -> Self {
        Self {
            method,
            arguments: Some(arguments),
            tag: None,
        }
    }
}

/// Response envelope: `{result, arguments?}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcResponse {
    /// `"success"` or an error message.
    pub result: String,
    /// Method results.
    #[serde(default)]
    pub arguments: Option<Value>,
    /// The request's tag.
    #[serde(default)]
    pub tag: Option<u64>,
}

impl RpcResponse {
    /// A successful response carrying `arguments`.
    pub fn success(arguments: Value) -> Self {
        Self {
            result: "success".to_owned(),
            arguments: Some(arguments),
            tag: None,
        }
    }

    /// Decodes the arguments object into `R`.
    pub fn decode<R: serde::de::DeserializeOwned>(self) -> ClientResult<R> {
        let arguments = self
            .arguments
            .ok_or_else(|| TorrentClientError::Parse("response has no arguments".into()))?;
        Ok(serde_json::from_value(arguments)?)
    }
}

/// Seam between the adapter and the wire, mocked in adapter tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait TransmissionRpc {
    /// Sends one RPC, failing unless the daemon answers `result: "success"`.
    async fn request(&self, request: RpcRequest) -> ClientResult<RpcResponse>;
}

/// HTTP transport for Transmission's RPC endpoint.
///
/// The session id is the only mutable state. Bootstrapping it is single-flight: while
/// no id is known, one caller negotiates and the others wait for its outcome.
pub struct TransmissionTransport {
    http: reqwest::Client,
    url: Url,
    credentials: Option<(String, String)>,
    session_id: RwLock<Option<String>>,
    bootstrap: Mutex<()>,
}

impl TransmissionTransport {
    /// Creates a transport for the RPC endpoint at `url`.
    pub fn new(
        url: Url,
        credentials: Option<(String, String)>,
        config: &TransportConfig,
    ) -> ClientResult<Self> {
        debug!("Creating Transmission transport for {}", url);
        Ok(Self {
            http: config.http_client()?,
            url,
            credentials,
            session_id: RwLock::new(None),
            bootstrap: Mutex::new(()),
        })
    }

    /// The currently negotiated session id.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    fn store_session_id(&self, id: &str) {
        *self.session_id.write() = Some(id.to_owned());
    }

    async fn post(&self, body: &[u8], session_id: Option<&str>) -> ClientResult<reqwest::Response> {
        let mut builder = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(id) = session_id {
            builder = builder.header(SESSION_ID_HEADER, id);
        }
        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }
        builder.send().await.map_err(network_error)
    }

    /// Sends `body`, renegotiating once on 409 and replaying the same body.
    async fn exchange(
        &self,
        body: &[u8],
        mut session_id: Option<String>,
    ) -> ClientResult<RpcResponse> {
        for attempt in 1..=MAX_ATTEMPTS {
            let response = self.post(body, session_id.as_deref()).await?;
            let status = response.status();

            if status == StatusCode::CONFLICT {
                let fresh = response
                    .headers()
                    .get(SESSION_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                let Some(fresh) = fresh else {
                    warn!("Transmission answered 409 without a session id");
                    return Err(TorrentClientError::http(
                        409,
                        "conflict without X-Transmission-Session-Id",
                    ));
                };
                self.store_session_id(&fresh);
                if attempt == MAX_ATTEMPTS {
                    warn!("Transmission rejected the renegotiated session id");
                    break;
                }
                debug!("Transmission session id renegotiated");
                session_id = Some(fresh);
                continue;
            }

            if !status.is_success() {
                return Err(TorrentClientError::http(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                ));
            }

            let bytes = response.bytes().await.map_err(network_error)?;
            let decoded: RpcResponse = serde_json::from_slice(&bytes)?;
            if decoded.result != "success" {
                return Err(TorrentClientError::Transmission(decoded.result));
            }
            return Ok(decoded);
        }

        Err(TorrentClientError::http(409, "session renegotiation failed"))
    }
}

impl TransmissionRpc for TransmissionTransport {
    async fn request(&self, request: RpcRequest) -> ClientResult<RpcResponse> {
        let body = serde_json::to_vec(&request)?;

        if let Some(id) = self.session_id() {
            return self.exchange(&body, Some(id)).await;
        }

        let bootstrap = self.bootstrap.lock().await;
        if let Some(id) = self.session_id() {
            drop(bootstrap);
            return self.exchange(&body, Some(id)).await;
        }
        debug!("Bootstrapping Transmission session with {:?}", request.method);
        let outcome = self.exchange(&body, None).await;
        drop(bootstrap);
        outcome
    }
}

impl fmt::Debug for TransmissionTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmissionTransport")
            .field("url", &self.url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .field("has_session", &self.session_id.read().is_some())
            .finish()
    }
}
