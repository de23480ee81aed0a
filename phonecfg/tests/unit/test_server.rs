//! Catalog server unit tests

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use catalog_api::models::{
    ConfigDocument, DssField, DssKey, ErrorResponse, HealthResponse, SaveResponse, SipAccount,
    SipField,
};
use phonecfg::catalog::dir::DirCatalog;
use phonecfg::editor::{EditorState, Outcome};
use phonecfg::filesys::dir::Dir;
use phonecfg::http::client::HttpClient;
use phonecfg::provision::{format_dss_block, format_sip_block};
use phonecfg::server::serve::router;
use phonecfg::server::state::ServerState;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tower::ServiceExt;

fn seeded_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let raw = format!(
        "{}\n{}",
        format_dss_block(&[DssKey::blank(1)]),
        format_sip_block(&SipAccount {
            phone_number: "100".to_string(),
            ..Default::default()
        })
    );
    fs::write(tmp.path().join("lobby.cfg"), raw).unwrap();
    fs::write(tmp.path().join("desk.cfg"), "<<VOIP CONFIG FILE>>\n").unwrap();
    tmp
}

fn app(tmp: &tempfile::TempDir) -> axum::Router {
    let catalog = Arc::new(DirCatalog::new(Dir::new(tmp.path())));
    router(Arc::new(ServerState::new(catalog)))
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let tmp = seeded_dir();
    let response = app(&tmp)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_list_configs() {
    let tmp = seeded_dir();
    let response = app(&tmp)
        .oneshot(Request::get("/api/configs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<String> = read_json(response).await;
    assert_eq!(ids, vec!["desk.cfg", "lobby.cfg"]);
}

#[tokio::test]
async fn test_get_config() {
    let tmp = seeded_dir();
    let response = app(&tmp)
        .oneshot(Request::get("/api/config/lobby.cfg").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let document: ConfigDocument = read_json(response).await;
    assert_eq!(document.sip_account.phone_number, "100");
    assert_eq!(document.dss_keys, vec![DssKey::blank(1)]);
}

#[tokio::test]
async fn test_get_missing_config() {
    let tmp = seeded_dir();
    let response = app(&tmp)
        .oneshot(Request::get("/api/config/nope.cfg").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.detail, "Config not found");
}

#[tokio::test]
async fn test_post_rejected_config() {
    let tmp = seeded_dir();
    let body = serde_json::json!({
        "raw_config": "<<VOIP CONFIG FILE>>\n",
        "sip_account": {"phone_number": "1\n2"},
        "dss_keys": [],
    });
    let response = app(&tmp)
        .oneshot(
            Request::post("/api/config/desk.cfg")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: SaveResponse = read_json(response).await;
    assert!(!result.success);
    assert_eq!(
        fs::read_to_string(tmp.path().join("desk.cfg")).unwrap(),
        "<<VOIP CONFIG FILE>>\n"
    );
}

#[tokio::test]
async fn test_editor_against_live_server() {
    let tmp = seeded_dir();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(&tmp);
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let client = HttpClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let mut editor = EditorState::new(Arc::new(client));

    assert_eq!(editor.refresh().await, Outcome::Applied);
    assert_eq!(editor.available(), ["desk.cfg", "lobby.cfg"]);

    assert_eq!(editor.select("missing.cfg").await, Outcome::Failed);
    assert_eq!(editor.status().unwrap().text, "Config not found: missing.cfg");

    assert_eq!(editor.select("lobby.cfg").await, Outcome::Applied);
    editor.update_sip_field(SipField::PhoneNumber, "101").unwrap();
    editor.update_dss_field(0, DssField::Label, "Front").unwrap();
    assert_eq!(editor.append_dss_key().unwrap(), 2);
    editor.update_dss_field(1, DssField::Value, "102").unwrap();

    assert_eq!(editor.save().await.unwrap(), Outcome::Applied);
    assert_eq!(editor.status().unwrap().text, "Config updated");

    let stored = fs::read_to_string(tmp.path().join("lobby.cfg")).unwrap();
    assert!(stored.contains("SIP1 Phone Number     :101\n"));
    assert!(stored.contains("Fkey1 Title   :Front\n"));
    assert!(stored.contains("Fkey2 Value   :102\n"));

    // what was saved is what comes back
    let edited = editor.projection().cloned().unwrap();
    editor.reload().await.unwrap();
    let reloaded = editor.projection().unwrap();
    assert_eq!(reloaded.sip_account(), edited.sip_account());
    assert_eq!(reloaded.dss_keys(), edited.dss_keys());
    assert_eq!(reloaded.raw_config(), stored);

    server.abort();
}
