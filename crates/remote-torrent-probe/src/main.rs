//! # Remote Torrent Probe
//!
//! ## Usage
//!
//! ```sh,ignore
//! REMOTE_TORRENT_URL=http://localhost:9091/transmission/rpc cargo run -p remote-torrent-probe -- list
//! cargo run -p remote-torrent-probe -- --kind qbittorrent --url http://nas:8080 --username admin stats
//! ```

mod cli;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use remote_torrent_controller::{ClientRegistry, TransportConfig};
use remote_torrent_types::{SessionStats, TorrentClient, TorrentClientError};

use crate::cli::{Cli, Command};

/// Error variants of the probe.
#[derive(Error, Debug)]
enum ProbeError {
    /// The daemon call failed.
    #[error(transparent)]
    Client(#[from] TorrentClientError),

    /// A response could not be rendered.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_stats(stats: &SessionStats) {
    println!("torrents: {}", stats.torrent_count);
    println!("active: {}", stats.active_torrent_count);
    println!("paused: {}", stats.paused_torrent_count);
    println!("download_speed: {} B/s", stats.download_speed);
    println!("upload_speed: {} B/s", stats.upload_speed);
    if let Some(current) = &stats.current_stats {
        println!("session_downloaded: {}", current.downloaded_bytes);
        println!("session_uploaded: {}", current.uploaded_bytes);
    }
    if let Some(cumulative) = &stats.cumulative_stats {
        println!("total_downloaded: {}", cumulative.downloaded_bytes);
        println!("total_uploaded: {}", cumulative.uploaded_bytes);
    }
}

fn print_object(value: Value) {
    if let Value::Object(members) = value {
        for (key, value) in members {
            match value {
                Value::String(text) => println!("{key}: {text}"),
                other => println!("{key}: {other}"),
            }
        }
    }
}

async fn run(cli: Cli) -> Result<(), ProbeError> {
    let registry = ClientRegistry::with_config(TransportConfig::from_env());
    let server = cli.server();
    debug!("Probing {server:?}");
    let client = registry.client(&server)?;

    match cli.command {
        Command::Ping => {
            client.ping().await?;
            println!("ok");
        }
        Command::List => {
            for torrent in client.get_torrents().await? {
                println!(
                    "{}\t{}\t{:.1}%\t{}",
                    torrent.id,
                    torrent.status,
                    torrent.percent_done * 100.0,
                    torrent.name
                );
            }
        }
        Command::Stats => print_stats(&client.get_session_stats().await?),
        Command::Session => print_object(serde_json::to_value(client.get_session().await?)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ProbeError::Client(err)) => {
            error!("Probe failed: {err}");
            eprintln!("{:?}: {err}", err.kind());
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("Probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}
