use axum_test::TestServer;
use serde_json::json;
use study_sheet::api::{create_router, MessageResponse, LIVENESS_MESSAGE, UPDATED_MESSAGE};
use study_sheet::models::*;
use study_sheet::store::{seed_sheet, DocumentStore};

fn setup() -> (TestServer, DocumentStore) {
    let store = DocumentStore::seeded();
    let app = create_router(store.clone());
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store)
}

fn graphs_sheet() -> Sheet {
    Sheet {
        topics: vec![Topic {
            id: "g1".to_string(),
            title: "Graphs".to_string(),
            sub_topics: vec![SubTopic {
                id: "g1s1".to_string(),
                title: "BFS".to_string(),
                questions: vec![Question {
                    id: "g1q1".to_string(),
                    title: "Number of Islands".to_string(),
                    difficulty: Difficulty::Medium,
                    link: "https://leetcode.com/problems/number-of-islands".to_string(),
                    completed: true,
                }],
            }],
        }],
    }
}

mod liveness {
    use super::*;

    #[tokio::test]
    async fn root_returns_plain_text_message() {
        let (server, _) = setup();

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text(LIVENESS_MESSAGE);
    }
}

mod get_sheet {
    use super::*;

    #[tokio::test]
    async fn returns_seed_document_at_startup() {
        let (server, _) = setup();

        let response = server.get("/api/sheet").await;

        response.assert_status_ok();
        let sheet: Sheet = response.json();
        assert_eq!(sheet, seed_sheet());
    }

    #[tokio::test]
    async fn uses_camel_case_wire_shape() {
        let (server, _) = setup();

        let body: serde_json::Value = server.get("/api/sheet").await.json();

        let first_question = &body["topics"][0]["subTopics"][0]["questions"][0];
        assert_eq!(first_question["id"], "q1");
        assert_eq!(first_question["difficulty"], "Easy");
        assert_eq!(first_question["completed"], false);
    }

    #[tokio::test]
    async fn returns_empty_topics_for_empty_store() {
        let app = create_router(DocumentStore::new(Sheet::empty()));
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/api/sheet").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "topics": [] }));
    }
}

mod replace_sheet {
    use super::*;

    #[tokio::test]
    async fn replaces_whole_document_and_acknowledges() {
        let (server, store) = setup();

        let response = server.post("/api/sheet").json(&graphs_sheet()).await;

        response.assert_status_ok();
        let ack: MessageResponse = response.json();
        assert_eq!(ack.message, UPDATED_MESSAGE);
        assert_eq!(store.get(), graphs_sheet());
    }

    #[tokio::test]
    async fn subsequent_get_returns_replaced_document() {
        let (server, _) = setup();

        server.post("/api/sheet").json(&graphs_sheet()).await;
        let sheet: Sheet = server.get("/api/sheet").await.json();

        assert_eq!(sheet, graphs_sheet());
    }

    #[tokio::test]
    async fn last_write_wins() {
        let (server, _) = setup();

        server.post("/api/sheet").json(&graphs_sheet()).await;
        server.post("/api/sheet").json(&Sheet::empty()).await;
        let sheet: Sheet = server.get("/api/sheet").await.json();

        assert!(sheet.topics.is_empty());
    }

    #[tokio::test]
    async fn fills_defaults_for_missing_optional_fields() {
        let (server, store) = setup();

        let response = server
            .post("/api/sheet")
            .json(&json!({
                "topics": [{
                    "id": "t9",
                    "title": "Heaps",
                    "subTopics": [{
                        "id": "s9",
                        "title": "Top K",
                        "questions": [{ "id": "q9", "title": "Kth Largest", "difficulty": "Hard" }]
                    }]
                }]
            }))
            .await;

        response.assert_status_ok();
        let question = &store.get().topics[0].sub_topics[0].questions[0];
        assert_eq!(question.link, "");
        assert!(!question.completed);
        assert_eq!(question.difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn rejects_body_that_is_not_a_sheet() {
        let (server, store) = setup();

        let response = server
            .post("/api/sheet")
            .json(&json!({ "topics": "nope" }))
            .await;

        assert!(response.status_code().is_client_error());
        assert_eq!(store.get(), seed_sheet());
    }

    #[tokio::test]
    async fn rejects_unknown_difficulty() {
        let (server, store) = setup();

        let response = server
            .post("/api/sheet")
            .json(&json!({
                "topics": [{
                    "id": "t1",
                    "title": "Arrays",
                    "subTopics": [{
                        "id": "s1",
                        "title": "Basics",
                        "questions": [{ "id": "q1", "title": "Two Sum", "difficulty": "Trivial" }]
                    }]
                }]
            }))
            .await;

        assert!(response.status_code().is_client_error());
        assert_eq!(store.get(), seed_sheet());
    }
}
