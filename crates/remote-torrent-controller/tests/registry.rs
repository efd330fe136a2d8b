#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use remote_torrent_controller::{Client, ClientRegistry, TransportConfig};
use remote_torrent_types::{Server, ServerKind, TorrentClient};

const RPC_PATH: &str = "/transmission/rpc";
const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

fn record(server: &MockServer, updated_at: i64) -> Server {
    Server {
        id: "home".into(),
        url: server.url(RPC_PATH),
        kind: ServerKind::Transmission,
        username: Some("admin".into()),
        password: Some("secret".into()),
        updated_at,
    }
}

#[test_log::test(tokio::test)]
async fn edited_server_gets_a_fresh_session() {
    let server = MockServer::start_async().await;
    let conflict = server
        .mock_async(|when, then| {
            when.method(POST).path(RPC_PATH).header_missing(SESSION_ID_HEADER);
            then.status(409).header(SESSION_ID_HEADER, "sid-1");
        })
        .await;
    let accepted = server
        .mock_async(|when, then| {
            when.method(POST).path(RPC_PATH).header(SESSION_ID_HEADER, "sid-1");
            then.status(200)
                .json_body(json!({"result": "success", "arguments": {"version": "4.0.6"}}));
        })
        .await;

    let registry = ClientRegistry::with_config(TransportConfig::default());

    let first = registry.client(&record(&server, 1)).unwrap();
    first.ping().await.unwrap();
    let again = registry.client(&record(&server, 1)).unwrap();
    again.ping().await.unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert!(matches!(*first, Client::Transmission(_)));
    conflict.assert_hits_async(1).await;

    let edited = registry.client(&record(&server, 2)).unwrap();
    edited.ping().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &edited));
    assert_eq!(registry.len(), 1);
    conflict.assert_hits_async(2).await;
    accepted.assert_hits_async(3).await;
}
