//! MediaOrderManager committing against a live album server

use std::net::SocketAddr;

use kiln_client::{AlbumClient, ClientConfig, ClientError, NetworkHttpClient};
use kiln_reorder::{ReorderError, SortCriterion};
use kiln_server::store::{SeedAlbum, SeedFile, SeedMedia};
use kiln_server::{AlbumStore, Config, ErrorCode, ServerState};
use shared::models::{MediaKind, OrderEntry};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestServer {
    addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

fn media(id: i64, label: &str, captured_at: i64) -> SeedMedia {
    SeedMedia {
        id,
        url: format!("/m/{id}.jpg"),
        label: label.to_string(),
        kind: MediaKind::Image,
        captured_at: Some(captured_at),
        byte_size: None,
        sort_order: None,
    }
}

async fn start_server() -> TestServer {
    let seed = SeedFile {
        albums: vec![SeedAlbum {
            id: 1,
            title: "Studio".into(),
            description: None,
            media: vec![
                media(10, "wheel", 300),
                media(11, "apron", 100),
                media(12, "kiln", 200),
                media(13, "shelf", 400),
            ],
        }],
    };
    let state = ServerState::new(
        Config::with_overrides("/tmp/kiln-test", 0),
        AlbumStore::from_seed(seed).unwrap(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        kiln_server::serve(listener, state, shutdown).await.unwrap();
    });

    TestServer {
        addr,
        _shutdown: tx,
    }
}

fn client(server: &TestServer) -> AlbumClient<NetworkHttpClient> {
    let config = ClientConfig::new(format!("http://{}", server.addr)).with_timeout(5);
    AlbumClient::new(config.build_http_client().unwrap())
}

#[tokio::test]
async fn test_reorder_is_persisted() {
    let server = start_server().await;
    let albums = client(&server);

    let manager = albums.open_album(1).await.unwrap();
    assert_eq!(manager.current_ids(), vec![10, 11, 12, 13]);

    let outcome = manager.move_by_drag(0, Some(2)).await.unwrap();
    assert!(outcome.is_committed());
    assert_eq!(manager.current_ids(), vec![11, 12, 10, 13]);

    let stored: Vec<i64> = albums
        .album_media(1)
        .await
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(stored, vec![11, 12, 10, 13]);
}

#[tokio::test]
async fn test_auto_sort_round_trip() {
    let server = start_server().await;
    let albums = client(&server);
    let manager = albums.open_album(1).await.unwrap();

    manager.auto_sort(SortCriterion::Newest).await.unwrap();
    assert_eq!(manager.current_ids(), vec![13, 10, 12, 11]);

    albums.refresh(&manager, 1).await.unwrap();
    assert_eq!(manager.current_ids(), vec![13, 10, 12, 11]);
    assert_eq!(manager.current_order()[0].sort_order, 1);
}

#[tokio::test]
async fn test_rejected_commit_rolls_back() {
    let server = start_server().await;
    let albums = client(&server);
    let manager = albums.open_album(1).await.unwrap();

    // The server reorders first; the manager then holds a stale subset
    albums
        .update_sort_order(1, &OrderEntry::sequence([13, 12, 11, 10]))
        .await
        .unwrap();
    manager.replace(
        albums
            .album_media(1)
            .await
            .unwrap()
            .into_iter()
            .take(3)
            .collect(),
    );

    let err = manager.move_to_end(&13).await.unwrap_err();

    match err {
        ReorderError::CommitFailed { reason, .. } => {
            assert!(reason.contains("lists 3 items"), "{reason}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(manager.current_ids(), vec![13, 12, 11]);
    assert!(!manager.is_syncing());
}

#[tokio::test]
async fn test_unreachable_server_rolls_back() {
    let server = start_server().await;
    let albums = client(&server);
    let manager = albums.open_album(1).await.unwrap();

    // Point a committer at a closed port
    let dead = AlbumClient::new(
        ClientConfig::new("http://127.0.0.1:9")
            .with_timeout(2)
            .build_http_client()
            .unwrap(),
    );
    let committer = dead.committer(1);
    assert_eq!(committer.album_id(), 1);
    let offline = kiln_reorder::MediaOrderManager::new(
        manager.current_order(),
        std::sync::Arc::new(committer),
    );

    let err = offline.move_item_forward(&10).await.unwrap_err();

    assert!(matches!(err, ReorderError::CommitFailed { .. }));
    assert!(err.to_string().contains("album 1"), "{err}");
    assert_eq!(offline.current_ids(), vec![10, 11, 12, 13]);
}

#[tokio::test]
async fn test_api_errors_carry_codes() {
    let server = start_server().await;
    let albums = client(&server);

    let err = albums.album(99).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.error_code(), Some(ErrorCode::AlbumNotFound));

    let summaries = albums.list_albums().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].media_count, 4);
}

#[tokio::test]
async fn test_malformed_payload_is_an_api_error() {
    use kiln_client::{BatchUpdateResponse, HttpClient};

    let server = start_server().await;
    let albums = client(&server);

    let err = albums
        .http()
        .put::<BatchUpdateResponse, _>(
            "api/albums/1/media/sort-order",
            &serde_json::json!({ "id": 10 }),
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::InvalidFormat));
    let stored: Vec<i64> = albums
        .album_media(1)
        .await
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(stored, vec![10, 11, 12, 13]);
}
