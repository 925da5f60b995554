use serde_json::json;
use std::time::Duration;
use watchtally::anilist::AniListClient;
use watchtally::franchise::{analyze, Vocabulary};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AniListClient {
    AniListClient::with_endpoint(format!("{}/graphql", server.uri()), Duration::from_secs(5))
        .expect("client builds")
}

fn collection_body() -> serde_json::Value {
    json!({
        "data": {
            "MediaListCollection": {
                "lists": [
                    {
                        "entries": [
                            {
                                "status": "COMPLETED",
                                "progress": 12,
                                "repeat": 1,
                                "media": {
                                    "id": 1,
                                    "title": { "romaji": "Shingeki no Kyojin", "english": "Attack on Titan" },
                                    "episodes": 12,
                                    "duration": 20,
                                    "relations": { "edges": [
                                        { "relationType": "SEQUEL", "node": { "id": 2 } }
                                    ] }
                                }
                            }
                        ]
                    },
                    {
                        "entries": [
                            {
                                "status": "CURRENT",
                                "progress": 5,
                                "repeat": 0,
                                "media": {
                                    "id": 2,
                                    "title": { "romaji": "Shingeki no Kyojin Season 2", "english": null },
                                    "episodes": null,
                                    "duration": 24,
                                    "relations": { "edges": [] }
                                }
                            },
                            {
                                "status": "PLANNING",
                                "progress": 0,
                                "repeat": 0,
                                "media": {
                                    "id": 3,
                                    "title": { "romaji": "Later", "english": null },
                                    "episodes": 10,
                                    "duration": 24,
                                    "relations": null
                                }
                            }
                        ]
                    }
                ]
            }
        }
    })
}

#[tokio::test]
async fn fetches_and_flattens_list_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "username": "eren" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection_body()))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .fetch_list_entries("eren")
        .await
        .expect("list fetch succeeds");
    assert_eq!(entries.len(), 3);

    let report = analyze(&entries, &Vocabulary::default());
    assert_eq!(report.count, 1);
    let franchise = &report.franchises[0];
    // 24 episodes * 20 + 5 episodes * 24
    assert_eq!(franchise.total_minutes, 600);
    assert_eq!(franchise.franchise_name, "Shingeki no Kyojin (Rewatched x1)");
    assert_eq!(report.total_time, "10h");
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "MediaListCollection": null },
            "errors": [{ "message": "User not found", "status": 404 }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_list_entries("nobody")
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("User not found"), "unexpected error: {}", msg);
    assert!(msg.contains("404"), "unexpected error: {}", msg);
}

#[tokio::test]
async fn http_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_list_entries("busy")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn missing_collection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    assert!(client_for(&server)
        .fetch_list_entries("empty")
        .await
        .is_err());
}
