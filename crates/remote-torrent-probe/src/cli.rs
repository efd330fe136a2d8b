use clap::{Parser, Subcommand};

use remote_torrent_types::{Server, ServerKind};

/// Checks a remote torrent daemon and prints what it reports.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// RPC URL for Transmission, WebUI root for qBittorrent.
    #[arg(short, long, env = "REMOTE_TORRENT_URL")]
    pub url: String,

    /// Daemon protocol: `transmission` or `qbittorrent`.
    #[arg(short, long, env = "REMOTE_TORRENT_KIND", default_value = "transmission")]
    pub kind: ServerKind,

    /// User name, if the daemon requires one.
    #[arg(long, env = "REMOTE_TORRENT_USERNAME")]
    pub username: Option<String>,

    /// Password for `--username`.
    #[arg(long, env = "REMOTE_TORRENT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// What to ask the daemon.
    #[command(subcommand)]
    pub command: Command,
}

/// Probe commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Command {
    /// Check that the daemon answers and accepts the credentials.
    Ping,
    /// Print one line per torrent.
    List,
    /// Print aggregate transfer statistics.
    Stats,
    /// Print global preferences.
    Session,
}

impl Cli {
    /// The server record the flags describe.
    pub(crate) fn server(&self) -> Server {
        Server {
            id: "probe".to_owned(),
            url: self.url.clone(),
            kind: self.kind,
            username: self.username.clone(),
            password: self.password.clone(),
            updated_at: 0,
        }
    }
}
