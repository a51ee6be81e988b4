//! End-to-end tests against a mock backend
//!
//! A small axum app stands in for the network-management API. Netfront is
//! served on an ephemeral port and exercised over real HTTP.

use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use netfront::config::FrontendConfig;
use netfront::fetch::{Fetcher, HttpFetcher};
use netfront::plugins::FragmentCompositor;
use netfront::{Error, Frontend};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn mock_backend() -> Router {
    Router::new()
        .route(
            "/api/get-menu/",
            get(|| async {
                Json(json!([
                    {"name": "DCIM", "groups": {"Inventory": {"items": {
                        "/dcim/devices/": {"name": "Devices"},
                        "/dcim/sites/": {"name": "Sites"}
                    }}}},
                    {"name": "IPAM", "properties": {"groups": {"Addressing": {"items": {
                        "/ipam/prefixes/": {"name": "Prefixes"}
                    }}}}}
                ]))
            }),
        )
        .route(
            "/api/dcim/devices/",
            get(|| async { Json(json!({"count": 1, "results": [{"id": 5, "display": "edge-05"}]})) }),
        )
        .route(
            "/api/dcim/devices/:id/",
            get(|Path(id): Path<String>| async move {
                if id != "5" {
                    return Err(StatusCode::NOT_FOUND);
                }
                Ok(Json(json!({
                    "id": 5,
                    "url": "/api/dcim/devices/5/",
                    "display": "edge-05",
                    "name": "edge-05",
                    "status": {"display": "Active", "url": "/api/extras/statuses/1/"},
                    "primary_ip": null,
                    "is_virtual": false
                })))
            }),
        )
        .route(
            "/api/dcim/devices/:id/plugin_full_width_fragment/",
            get(|| async { Html("<div id=\"device-plugin\">device plugin</div>") }),
        )
        .route(
            "/api/dcim/sites/:id/",
            get(|| async { Json(json!({"id": 1, "slug": "ams01", "name": "AMS01", "display": "AMS01"})) }),
        )
        .route("/dcim/sites/:slug/", get(site_view))
        .route(
            "/plugins/circuits/tab/",
            get(|| async { Html("<p>circuit listing</p>") }),
        )
}

/// Slug-addressed site view: tabs as JSON, otherwise the plugin fragment
async fn site_view(RawQuery(query): RawQuery) -> Response {
    match query.as_deref() {
        Some("format=json") => Json(json!({"tabs": [
            {"circuits": {"title": "Circuits", "url": "/plugins/circuits/tab/"}}
        ]}))
        .into_response(),
        _ => Html("<p>site fragment</p>").into_response(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_frontend(backend: SocketAddr) -> (SocketAddr, oneshot::Sender<()>) {
    let plugins = tempfile::tempdir().unwrap();
    let mut config = FrontendConfig::default();
    config.api.base_url = format!("http://{}", backend);
    config.plugins.dir = plugins.path().join("none");

    let frontend = Frontend::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        frontend
            .serve_with_shutdown(listener, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });
    (addr, tx)
}

async fn page(addr: SocketAddr, path: &str) -> (reqwest::StatusCode, String) {
    let resp = reqwest::get(format!("http://{}{}", addr, path)).await.unwrap();
    let status = resp.status();
    (status, resp.text().await.unwrap())
}

#[tokio::test]
async fn test_http_fetcher_json_and_text() {
    let backend = spawn(mock_backend()).await;
    let config = FrontendConfig {
        api: netfront::config::ApiConfig {
            base_url: format!("http://{}", backend),
            ..Default::default()
        },
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&config.api).unwrap();

    let menu = fetcher.get_json(&config.api.menu_url()).await.unwrap();
    assert_eq!(menu[0]["name"], "DCIM");

    let fragment = fetcher
        .get_text(&format!(
            "{}plugin_full_width_fragment/",
            config.api.object_url("dcim", "devices", "5")
        ))
        .await
        .unwrap();
    assert!(fragment.contains("device plugin"));
}

#[tokio::test]
async fn test_http_fetcher_maps_status_errors() {
    let backend = spawn(mock_backend()).await;
    let base = format!("http://{}", backend);
    let fetcher = HttpFetcher::new(&netfront::config::ApiConfig {
        base_url: base.clone(),
        ..Default::default()
    })
    .unwrap();

    let err = fetcher
        .get_json(&format!("{}/api/dcim/devices/9/", base))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch { status: 404, .. }));
    assert_eq!(err.status(), Some(404));

    let compositor = FragmentCompositor::new(Arc::new(fetcher));
    assert!(compositor
        .fetch_fragment(&format!("{}/api/ipam/vlans/1/", base))
        .await
        .is_none());
}

#[tokio::test]
async fn test_detail_page_end_to_end() {
    let backend = spawn(mock_backend()).await;
    let (addr, shutdown) = spawn_frontend(backend).await;

    let (status, body) = page(addr, "/dcim/devices/5").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains(r#"<tr data-key="status"><td>Status</td><td>Active</td></tr>"#));
    assert!(body.contains(r#"<tr data-key="primary_ip"><td>Primary Ip</td><td>—</td></tr>"#));
    assert!(body.contains("🚫"));
    assert!(body.contains(r#"<div id="device-plugin">device plugin</div>"#));
    assert!(body.contains(">Prefixes</a>"));

    let (status, body) = page(addr, "/dcim/devices/9").await;
    assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY);
    assert!(body.contains("Failed to load"));

    shutdown.send(()).unwrap();
}

#[tokio::test]
async fn test_slug_view_end_to_end() {
    let backend = spawn(mock_backend()).await;
    let (addr, shutdown) = spawn_frontend(backend).await;

    let (status, body) = page(addr, "/dcim/sites/1").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("<p>site fragment</p>"));
    assert!(body.contains(r##"<a href="#tab-plugin-circuits">Circuits</a>"##));
    assert!(body.contains("<p>circuit listing</p>"));

    shutdown.send(()).unwrap();
}

#[tokio::test]
async fn test_list_and_plugin_pages_end_to_end() {
    let backend = spawn(mock_backend()).await;
    let (addr, shutdown) = spawn_frontend(backend).await;

    let (status, body) = page(addr, "/dcim/devices").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains(r#"<a href="/dcim/devices/5">edge-05</a>"#));

    let (status, body) = page(addr, "/plugins/installed-plugins").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("No plugins installed."));

    shutdown.send(()).unwrap();
}

#[tokio::test]
async fn test_menu_failure_end_to_end() {
    let backend = spawn(Router::new().route(
        "/api/dcim/devices/:id/",
        get(|| async { Json(json!({"id": 5, "name": "edge-05"})) }),
    ))
    .await;
    let (addr, shutdown) = spawn_frontend(backend).await;

    let (status, body) = page(addr, "/dcim/devices/5").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("Failed to load menu"));
    assert!(body.contains(r#"data-key="name""#));

    shutdown.send(()).unwrap();
}
