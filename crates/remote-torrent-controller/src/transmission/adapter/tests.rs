//! Tests for the TransmissionAdapter.

use serde_json::json;

use remote_torrent_types::{
    AddTorrent, FailureKind, Mode, QueueMove, SessionUpdate, Status, TorrentClient,
    TorrentClientError, TorrentField, TorrentId, TorrentSource, TorrentUpdate,
};

use super::TransmissionAdapter;
use crate::testutil::{make_list_torrent, make_session_stats};
use crate::transmission::{MockTransmissionRpc, RpcMethod, RpcResponse};

fn requested_fields(arguments: &serde_json::Value) -> Vec<String> {
    arguments["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_get_torrents_requests_list_fields() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::TorrentGet
                && req.arguments.as_ref().is_some_and(|args| {
                    args.get("ids").is_none() && requested_fields(args).contains(&"eta".to_string())
                })
        })
        .times(1)
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "torrents": [make_list_torrent(1, "debian.iso"), make_list_torrent(2, "arch.iso")]
            })))
        });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let torrents = adapter.get_torrents().await.unwrap();

    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[0].id, TorrentId::Numeric(1));
    assert_eq!(torrents[0].status, Status::Downloading);
    assert_eq!(torrents[1].name, "arch.iso");
}

#[tokio::test]
async fn test_digests_request_exactly_two_fields() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.arguments
                .as_ref()
                .is_some_and(|args| requested_fields(args) == ["name", "percentDone"])
        })
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "torrents": [{"name": "a", "percentDone": 1.0}]
            })))
        });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let digests = adapter.get_torrent_digests().await.unwrap();

    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].percent_done, 1.0);
}

#[tokio::test]
async fn test_projection_missing_field_is_parse_error() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request().returning(|_| {
        Ok(RpcResponse::success(json!({
            "torrents": [{"id": 1, "name": "no status here"}]
        })))
    });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let err = adapter.get_torrents().await.unwrap_err();

    assert!(matches!(err, TorrentClientError::Parse(_)));
    assert_eq!(err.kind(), FailureKind::Rejected);
}

#[tokio::test]
async fn test_torrent_info_not_found() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| req.arguments.as_ref().is_some_and(|args| args["ids"] == json!([42])))
        .returning(|_| Ok(RpcResponse::success(json!({ "torrents": [] }))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    let err = adapter
        .get_torrent_info(&TorrentId::Numeric(42))
        .await
        .unwrap_err();

    assert_eq!(err, TorrentClientError::TorrentNotFound("42".into()));
}

#[tokio::test]
async fn test_torrent_files_by_hash() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.arguments
                .as_ref()
                .is_some_and(|args| args["ids"] == json!(["abc"]))
        })
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "torrents": [{
                    "id": 5,
                    "files": [{"name": "a.bin", "length": 10, "bytesCompleted": 5}],
                    "fileStats": [{"bytesCompleted": 5, "wanted": true, "priority": 1}],
                }]
            })))
        });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let files = adapter
        .get_torrent_files(&TorrentId::from("abc"))
        .await
        .unwrap();

    assert_eq!(files.id, TorrentId::Numeric(5));
    assert_eq!(files.files[0].length, 10);
    assert!(files.file_stats[0].wanted);
}

#[tokio::test]
async fn test_dynamic_field_list() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.arguments
                .as_ref()
                .is_some_and(|args| requested_fields(args) == ["hashString"])
        })
        .returning(|_| Ok(RpcResponse::success(json!({ "torrents": [{"hashString": "abc"}] }))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    let partial = adapter
        .torrents_with_fields(&[TorrentField::HashString], None)
        .await
        .unwrap();

    assert_eq!(partial[0].hash_string.as_deref(), Some("abc"));
    assert!(partial[0].name.is_none());
}

#[tokio::test]
async fn test_add_torrent_added() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::TorrentAdd
                && req.arguments
                    == Some(json!({
                        "filename": "magnet:?xt=urn:btih:abc",
                        "paused": true,
                        "download-dir": "/data",
                    }))
        })
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "torrent-added": {"id": 9, "name": "new", "hashString": "abc"}
            })))
        });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let added = adapter
        .add_torrent(AddTorrent {
            source: TorrentSource::Filename("magnet:?xt=urn:btih:abc".into()),
            download_dir: Some("/data".into()),
            paused: true,
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(added.id, TorrentId::Numeric(9));
    assert_eq!(added.hash_string, "abc");
}

#[tokio::test]
async fn test_add_torrent_duplicate() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.arguments
                .as_ref()
                .is_some_and(|args| args["metainfo"] == "ZGF0YQ==" && args["paused"] == false)
        })
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "torrent-duplicate": {"id": 3, "name": "old", "hashString": "def"}
            })))
        });

    let adapter = TransmissionAdapter::with_rpc(mock);
    let added = adapter
        .add_torrent(AddTorrent {
            source: TorrentSource::Metainfo("ZGF0YQ==".into()),
            download_dir: None,
            paused: false,
        })
        .await
        .unwrap();

    assert_eq!(added.map(|t| t.name), Some("old".to_string()));
}

#[tokio::test]
async fn test_remove_with_data() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::TorrentRemove
                && req.arguments == Some(json!({"ids": [1, "abc"], "delete-local-data": true}))
        })
        .times(1)
        .returning(|_| Ok(RpcResponse::success(json!({}))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    adapter
        .remove_torrents(&[TorrentId::Numeric(1), TorrentId::from("abc")], true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_actions_use_their_methods() {
    let ids = [TorrentId::Numeric(7)];
    for method in [
        RpcMethod::TorrentStart,
        RpcMethod::TorrentStartNow,
        RpcMethod::TorrentStop,
        RpcMethod::TorrentVerify,
        RpcMethod::TorrentReannounce,
    ] {
        let mut mock = MockTransmissionRpc::new();
        mock.expect_request()
            .withf(move |req| req.method == method && req.arguments == Some(json!({"ids": [7]})))
            .times(1)
            .returning(|_| Ok(RpcResponse::success(json!({}))));

        let adapter = TransmissionAdapter::with_rpc(mock);
        match method {
            RpcMethod::TorrentStart => adapter.start_torrents(&ids).await,
            RpcMethod::TorrentStartNow => adapter.start_torrents_now(&ids).await,
            RpcMethod::TorrentStop => adapter.stop_torrents(&ids).await,
            RpcMethod::TorrentVerify => adapter.verify_torrents(&ids).await,
            _ => adapter.reannounce_torrents(&ids).await,
        }
        .unwrap();
    }
}

#[tokio::test]
async fn test_queue_moves() {
    for (direction, method) in [
        (QueueMove::Top, RpcMethod::QueueMoveTop),
        (QueueMove::Up, RpcMethod::QueueMoveUp),
        (QueueMove::Down, RpcMethod::QueueMoveDown),
        (QueueMove::Bottom, RpcMethod::QueueMoveBottom),
    ] {
        let mut mock = MockTransmissionRpc::new();
        mock.expect_request()
            .withf(move |req| req.method == method)
            .times(1)
            .returning(|_| Ok(RpcResponse::success(json!({}))));

        let adapter = TransmissionAdapter::with_rpc(mock);
        adapter
            .move_in_queue(&[TorrentId::Numeric(1)], direction)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_set_torrents_merges_ids_into_update() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::TorrentSet
                && req.arguments
                    == Some(json!({
                        "ids": [1],
                        "uploadLimit": 50,
                        "uploadLimited": true,
                        "files-unwanted": [0, 2],
                        "seedRatioMode": 2,
                    }))
        })
        .times(1)
        .returning(|_| Ok(RpcResponse::success(json!({}))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    adapter
        .set_torrents(
            &[TorrentId::Numeric(1)],
            TorrentUpdate {
                upload_limit: Some(50),
                upload_limited: Some(true),
                files_unwanted: vec![0, 2],
                seed_ratio_mode: Some(Mode::Unlimited),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_location_moves_data() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::TorrentSetLocation
                && req.arguments
                    == Some(json!({"ids": [1], "location": "/archive", "move": true}))
        })
        .returning(|_| Ok(RpcResponse::success(json!({}))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    adapter
        .set_location(&[TorrentId::Numeric(1)], "/archive", true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_session_get_and_set() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| req.method == RpcMethod::SessionGet && req.arguments.is_none())
        .returning(|_| {
            Ok(RpcResponse::success(json!({
                "alt-speed-enabled": true,
                "download-dir": "/downloads",
                "version": "4.0.5",
            })))
        });
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::SessionSet
                && req.arguments == Some(json!({"alt-speed-enabled": false}))
        })
        .times(1)
        .returning(|_| Ok(RpcResponse::success(json!({}))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    let session = adapter.get_session().await.unwrap();
    assert!(session.alt_speed_enabled);
    assert_eq!(session.version, "4.0.5");

    adapter
        .set_session(SessionUpdate {
            alt_speed_enabled: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_session_stats() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| req.method == RpcMethod::SessionStats)
        .returning(|_| Ok(RpcResponse::success(make_session_stats())));

    let adapter = TransmissionAdapter::with_rpc(mock);
    let stats = adapter.get_session_stats().await.unwrap();

    assert_eq!(stats.torrent_count, 3);
    assert_eq!(stats.cumulative_stats.unwrap().files_added, 3);
}

#[tokio::test]
async fn test_ping_requests_version_only() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .withf(|req| {
            req.method == RpcMethod::SessionGet
                && req.arguments == Some(json!({"fields": ["version"]}))
        })
        .times(1)
        .returning(|_| Ok(RpcResponse::success(json!({"version": "4.0.5"}))));

    let adapter = TransmissionAdapter::with_rpc(mock);
    adapter.ping().await.unwrap();
}

#[tokio::test]
async fn test_rpc_errors_propagate() {
    let mut mock = MockTransmissionRpc::new();
    mock.expect_request()
        .returning(|_| Err(TorrentClientError::Transmission("invalid argument".into())));

    let adapter = TransmissionAdapter::with_rpc(mock);
    let err = adapter.stop_torrents(&[TorrentId::Numeric(1)]).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Rejected);
    assert_eq!(err, TorrentClientError::Transmission("invalid argument".into()));
}
