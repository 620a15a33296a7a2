use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cinematch_core::EngineConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

const CATALOG: &str = "Movie Name,Storyline\n\
Inception,\"A skilled thief steals corporate secrets by entering dreams and planting an idea.\"\n\
Dream Heist,\"A thief enters the dreams of a corporate heir to plant an idea and steal secrets.\"\n\
The Matrix,\"A computer hacker learns that reality is a simulation controlled by machines.\"\n\
,\"A thief steals paintings from a museum.\"\n\
Amélie,\"A shy waitress in Montmartre secretly changes the lives of strangers.\"\n";

fn build_app() -> (tempfile::TempDir, Router) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    fs::write(&path, CATALOG).unwrap();
    let app = server::build_app(&path, EngineConfig::default()).unwrap();
    (dir, app)
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn recommends_by_misspelled_title() {
    let (_dir, app) = build_app();
    let (status, json) = call(app, "/recommend/title?q=inceptoin&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Dream Heist");
    assert!(results.iter().all(|r| r["title"] != "Inception"));
    assert_eq!(results[1]["title"], "Unknown Title");
    assert_eq!(results[1]["imdb_url"], "https://www.imdb.com/find?q=Unknown%20Title");
}

#[tokio::test]
async fn unknown_title_is_an_empty_ok_response() {
    let (_dir, app) = build_app();
    let (status, json) = call(app, "/recommend/title?q=Totally%20Unknown%20Movie%20XYZ123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn recommends_by_storyline() {
    let (_dir, app) = build_app();
    let (status, json) = call(app, "/recommend/storyline?q=hacker%20discovers%20simulation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["title"], "The Matrix");
    assert_eq!(json["total"], 5);

    let (_dir, app) = build_app();
    let (_, json) = call(app, "/recommend/storyline?q=").await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn suggests_and_reports_stats() {
    let (_dir, app) = build_app();
    let (status, json) = call(app.clone(), "/suggest?q=Dream").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggestions"][0], "Dream Heist");

    let (status, json) = call(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["num_docs"], 5);
    assert_eq!(json["distinct_titles"], 4);
}

#[test]
fn missing_column_fails_startup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    fs::write(&path, "title,overview\nA,B\n").unwrap();
    assert!(server::build_app(&path, EngineConfig::default()).is_err());
}
