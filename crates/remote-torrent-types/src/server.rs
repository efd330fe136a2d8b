//! Identity of a remote daemon, as supplied by settings storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which daemon protocol a server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    /// Transmission JSON-RPC.
    Transmission,
    /// qBittorrent WebUI API.
    Qbittorrent,
}

impl std::str::FromStr for ServerKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "transmission" => Ok(ServerKind::Transmission),
            "qbittorrent" => Ok(ServerKind::Qbittorrent),
            other => Err(format!("unknown server type '{other}'")),
        }
    }
}

/// A configured remote daemon. Read-only to this layer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Stable identifier.
    pub id: String,
    /// RPC URL for Transmission, WebUI base URL for qBittorrent.
    pub url: String,
    /// Daemon protocol.
    #[serde(rename = "type")]
    pub kind: ServerKind,
    /// Optional user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional password.
    #[serde(default)]
    pub password: Option<String>,
    /// Bumped on every edit of the record.
    pub updated_at: i64,
}

impl Server {
    /// Returns `(username, password)` when a user name is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref().unwrap_or_default()))
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("kind", &self.kind)
            .field("username", &self.username.as_ref().map(|_| "<set>"))
            .field("password", &self.password.as_ref().map(|_| "<set>"))
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server {
            id: "nas".into(),
            url: "http://nas:9091/transmission/rpc".into(),
            kind: ServerKind::Transmission,
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            updated_at: 1,
        }
    }

    #[test]
    fn debug_hides_credentials() {
        let printed = format!("{:?}", server());
        assert!(!printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<set>"));
    }

    #[test]
    fn decodes_settings_record() {
        let server: Server = serde_json::from_str(
            r#"{"id": "a", "url": "http://h:8080", "type": "qbittorrent", "updatedAt": 5}"#,
        )
        .unwrap();
        assert_eq!(server.kind, ServerKind::Qbittorrent);
        assert_eq!(server.credentials(), None);
        assert_eq!(server.updated_at, 5);
    }

    #[test]
    fn credentials_default_to_empty_password() {
        let mut server = server();
        server.password = None;
        assert_eq!(server.credentials(), Some(("admin", "")));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("QBittorrent".parse(), Ok(ServerKind::Qbittorrent));
        assert!("deluge".parse::<ServerKind>().is_err());
    }
}
