//! Client store integration tests against a real HTTP server.

use axum::{http::StatusCode, routing::get, Json, Router};
use study_sheet::api::create_router;
use study_sheet::client::{SheetClient, SheetTransport, TransportError};
use study_sheet::models::*;
use study_sheet::session::SheetStore;
use study_sheet::store::{seed_sheet, DocumentStore};

/// Serve a fresh store on an ephemeral port and return its handle and base URL.
async fn spawn_server(initial: Sheet) -> (DocumentStore, String) {
    let store = DocumentStore::new(initial);
    let app = create_router(store.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    (store, format!("http://{}", addr))
}

/// A URL nothing listens on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("listener has an address");
    drop(listener);
    format!("http://{}", addr)
}

/// Serve `initial` on GET and reject every POST.
async fn spawn_read_only_server(initial: Sheet) -> String {
    let app = Router::new().route(
        "/api/sheet",
        get(move || {
            let sheet = initial.clone();
            async move { Json(sheet) }
        })
        .post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "read only") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    format!("http://{}", addr)
}

mod transport {
    use super::*;

    #[tokio::test]
    async fn fetches_the_stored_document() {
        let (_, url) = spawn_server(seed_sheet()).await;
        let client = SheetClient::new(url);

        let sheet = client.fetch_document().await.expect("fetch succeeds");

        assert_eq!(sheet, seed_sheet());
    }

    #[tokio::test]
    async fn submit_replaces_the_stored_document() {
        let (server, url) = spawn_server(seed_sheet()).await;
        let client = SheetClient::new(url);

        client
            .submit_document(&Sheet::empty())
            .await
            .expect("submit succeeds");

        assert_eq!(server.get(), Sheet::empty());
    }

    #[tokio::test]
    async fn ping_returns_liveness_text() {
        let (_, url) = spawn_server(Sheet::empty()).await;

        let message = SheetClient::new(url).ping().await.expect("ping succeeds");

        assert_eq!(message, study_sheet::api::LIVENESS_MESSAGE);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        let client = SheetClient::new(dead_url().await);

        let err = client.fetch_document().await.unwrap_err();

        assert!(matches!(err, TransportError::Http(_)));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (_, url) = spawn_server(Sheet::empty()).await;
        let client = SheetClient::new(format!("{}/nowhere", url));

        let err = client.fetch_document().await.unwrap_err();

        match err {
            TransportError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}

mod store {
    use super::*;

    #[tokio::test]
    async fn load_failure_leaves_store_loading() {
        let mut store = SheetStore::new(SheetClient::new(dead_url().await));

        assert!(store.load().await.is_err());
        assert!(!store.is_loaded());
        assert!(store.add_topic("Arrays").is_none());
    }

    #[tokio::test]
    async fn edits_reach_the_server_in_order() {
        let (server, url) = spawn_server(Sheet::empty()).await;
        let mut store = SheetStore::new(SheetClient::new(url));
        store.load().await.expect("load succeeds");

        drop(store.add_topic("Arrays"));
        let topic_id = store.sheet().unwrap().topics[0].id.clone();
        drop(store.add_sub_topic(&topic_id, "Basics"));
        let sub_id = store.sheet().unwrap().topics[0].sub_topics[0].id.clone();
        drop(store.add_question(
            &topic_id,
            &sub_id,
            &NewQuestion::new("Two Sum", Difficulty::Easy, "https://x"),
        ));
        let question_id = store.sheet().unwrap().topics[0].sub_topics[0].questions[0]
            .id
            .clone();
        let ticket = store
            .toggle_question_completion(&topic_id, &sub_id, &question_id)
            .expect("store is loaded");

        ticket.wait().await.expect("last submission succeeds");
        store.flush().await;

        let stored = server.get();
        assert_eq!(Some(&stored), store.sheet());
        assert_eq!(stored.progress(), Progress { completed: 1, total: 1 });
    }

    #[tokio::test]
    async fn rejected_submission_keeps_local_state() {
        let url = spawn_read_only_server(seed_sheet()).await;
        let mut store = SheetStore::new(SheetClient::new(url));
        store.load().await.expect("load succeeds");

        let ticket = store.delete_topic("t1").expect("store is loaded");
        let err = ticket.wait().await.unwrap_err();

        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "read only");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(store.sheet().unwrap().topics.len(), 2);
    }

    #[tokio::test]
    async fn reload_discards_local_state() {
        let (server, url) = spawn_server(seed_sheet()).await;
        let mut store = SheetStore::new(SheetClient::new(url));
        store.load().await.expect("load succeeds");

        server.replace(Sheet::empty());
        store.load().await.expect("reload succeeds");

        assert_eq!(store.sheet(), Some(&Sheet::empty()));
    }
}
