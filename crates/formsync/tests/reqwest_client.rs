//! End-to-end tests against an in-process control server.

#![cfg(not(target_arch = "wasm32"))]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use formsync::domain::{Display, FORM_URLENCODED};
use formsync::infrastructure::config::ClientConfig;
use formsync::infrastructure::http_client::ReqwestHttpClient;
use formsync::infrastructure::page::MemoryPage;
use formsync::infrastructure::spawner::TokioSpawner;
use formsync::ports::outbound::{HttpClientPort, PagePort, PostRequest, TransportError};
use formsync::{FormControl, FormSyncBridge, NotifyOutcome, PageLayout};

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, String)>>>);

impl Seen {
    fn all(&self) -> Vec<(String, String)> {
        self.0.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

async fn control(State(seen): State<Seen>, headers: HeaderMap, body: String) -> String {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if let Ok(mut v) = seen.0.lock() {
        v.push((content_type, body.clone()));
    }
    format!("Mode successfully changed to '{}'", body)
}

async fn teapot() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "Upload failed - I'm a teapot")
}

async fn spawn_server() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/control", post(control))
        .route("/file_upload", post(teapot))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, seen)
}

fn client_for(addr: SocketAddr) -> ReqwestHttpClient {
    let config = ClientConfig::new(&format!("http://{}/", addr))
        .unwrap()
        .direct();
    ReqwestHttpClient::new(&config)
}

#[tokio::test]
async fn posts_body_verbatim_with_form_content_type() {
    let (addr, seen) = spawn_server().await;
    let client = client_for(addr);

    let reply = client
        .post(&PostRequest::new("/control", FORM_URLENCODED, "mode=pong"))
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, "Mode successfully changed to 'mode=pong'");
    assert_eq!(
        seen.all(),
        vec![(FORM_URLENCODED.to_string(), "mode=pong".to_string())]
    );
}

#[tokio::test]
async fn non_ok_statuses_are_returned_not_raised() {
    let (addr, _seen) = spawn_server().await;
    let client = client_for(addr);

    let missing = client
        .post(&PostRequest::new("/nowhere", FORM_URLENCODED, "mode=pong"))
        .await
        .unwrap();
    let teapot = client
        .post(&PostRequest::new("/file_upload", FORM_URLENCODED, "x=y"))
        .await
        .unwrap();

    assert_eq!(missing.status, 404);
    assert_eq!(teapot.status, 418);
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(&format!("http://{}/", addr))
        .unwrap()
        .direct()
        .with_timeout(Duration::from_secs(5));
    let client = ReqwestHttpClient::new(&config);

    let err = client
        .post(&PostRequest::new("/control", FORM_URLENCODED, "mode=pong"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn bridge_updates_container_from_live_server() {
    let (addr, seen) = spawn_server().await;
    let layout = PageLayout::rich();
    let page = Arc::new(MemoryPage::for_layout(&layout));
    let spawner = Arc::new(TokioSpawner::new());
    let bridge = FormSyncBridge::new(
        Arc::new(client_for(addr)),
        page.clone(),
        spawner.clone(),
        layout,
    );

    bridge.init_page().unwrap();
    bridge
        .on_mode_changed(&FormControl::new("mode", "catch_colors_multiplayer").in_form("/control"))
        .unwrap();
    spawner.join_all().await;

    assert_eq!(
        page.inner_html("server_response").as_deref(),
        Some("Mode successfully changed to 'mode=catch_colors_multiplayer'")
    );
    assert_eq!(
        page.display("catch_colors_players_select"),
        Some(Display::InlineBlock)
    );
    assert_eq!(seen.all().len(), 1);
}

#[tokio::test]
async fn bridge_ignores_error_replies_from_live_server() {
    let (addr, _seen) = spawn_server().await;
    let layout = PageLayout::basic();
    let page = Arc::new(MemoryPage::for_layout(&layout));
    page.set_inner_html("server_response", "before").unwrap();
    let bridge = FormSyncBridge::new(
        Arc::new(client_for(addr)),
        page.clone(),
        Arc::new(TokioSpawner::new()),
        layout,
    );

    let outcome = bridge
        .send_and_apply(PostRequest::new("/file_upload", FORM_URLENCODED, "power=on"))
        .await;

    assert_eq!(outcome, NotifyOutcome::IgnoredStatus(418));
    assert_eq!(page.inner_html("server_response").as_deref(), Some("before"));
}
