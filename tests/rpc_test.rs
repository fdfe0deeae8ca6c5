//! Integration tests for the zynkod JSON-RPC server.
//! Spins up a real host on a free port and exercises the RPC surface.

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use zynkod::config::AppConfig;
use zynkod::nav::Screen;
use zynkod::AppContext;

/// Start a host on a random port and return the WebSocket URL.
///
/// The backend seams are the real HTTP clients pointed at an unreachable
/// base URL; none of the methods exercised here make a remote call.
async fn start_test_host() -> (String, Arc<AppContext>) {
    let data_dir = tempfile::tempdir().unwrap().keep();
    let port = get_free_port();

    let mut config = AppConfig::new(Some(port), Some(data_dir), None);
    config.backend.api_base_url = "http://127.0.0.1:1".to_string();
    let ctx = AppContext::build(config).await.unwrap();

    let ctx_server = ctx.clone();
    tokio::spawn(async move {
        zynkod::ipc::run(ctx_server).await.ok();
    });

    // Give server a moment to bind
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let url = format!("ws://127.0.0.1:{}", ctx.config.port);
    (url, ctx)
}

fn get_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn ws_rpc(url: &str, method: &str, params: Value) -> Value {
    let (mut ws, _) = connect_async(url).await.expect("ws connect failed");

    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params
    });
    ws.send(Message::Text(serde_json::to_string(&request).unwrap()))
        .await
        .unwrap();

    // Read messages until we get the response (skip notifications)
    loop {
        let msg = ws.next().await.unwrap().unwrap();
        if let Message::Text(text) = msg {
            let v: Value = serde_json::from_str(&text).unwrap();
            if v.get("id").is_some() {
                return v;
            }
        }
    }
}

#[tokio::test]
async fn test_app_ping() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "app.ping", json!({})).await;
    assert_eq!(resp["result"]["pong"], true);
}

#[tokio::test]
async fn test_app_status() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "app.status", json!({})).await;
    let result = &resp["result"];
    assert_eq!(result["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["screen"], "Splash");
    assert_eq!(result["pendingAlerts"], 0);
    assert_eq!(result["muted"], false);
}

#[tokio::test]
async fn test_method_not_found() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "no.such.method", json!({})).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() {
    let (url, _ctx) = start_test_host().await;
    let (mut ws, _) = connect_async(&url).await.unwrap();
    ws.send(Message::Text("{not json".to_string())).await.unwrap();
    loop {
        let msg = ws.next().await.unwrap().unwrap();
        if let Message::Text(text) = msg {
            let v: Value = serde_json::from_str(&text).unwrap();
            if v.get("error").is_some() {
                assert_eq!(v["error"]["code"], -32700);
                break;
            }
        }
    }
}

#[tokio::test]
async fn test_nav_current_and_push() {
    let (url, _ctx) = start_test_host().await;

    let resp = ws_rpc(&url, "nav.current", json!({})).await;
    assert_eq!(resp["result"]["current"], "Splash");

    let resp = ws_rpc(&url, "nav.push", json!({ "screen": "SignUp" })).await;
    assert_eq!(resp["result"]["current"], "SignUp");
    assert_eq!(
        resp["result"]["stack"],
        json!(["Splash", "SignUp"])
    );

    let resp = ws_rpc(&url, "nav.pop", json!({})).await;
    assert_eq!(resp["result"]["current"], "Splash");

    // The root never pops
    let resp = ws_rpc(&url, "nav.pop", json!({})).await;
    assert_eq!(resp["result"]["stack"], json!(["Splash"]));
}

#[tokio::test]
async fn test_nav_push_unknown_screen_is_invalid_params() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "nav.push", json!({ "screen": "Settings" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_onboarding_options_shape() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "onboarding.options", json!({})).await;
    let result = &resp["result"];
    assert_eq!(result["classes"].as_array().unwrap().len(), 7);
    assert_eq!(result["boards"].as_array().unwrap().len(), 36);
    assert_eq!(result["classes"][0]["label"], "Class 6");
    assert_eq!(result["classes"][0]["value"], "6");
    assert_eq!(result["days"].as_array().unwrap().len(), 31);
    assert_eq!(result["months"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_audio_mute_roundtrip() {
    let (url, _ctx) = start_test_host().await;

    let resp = ws_rpc(&url, "audio.start", json!({})).await;
    assert_eq!(resp["result"]["muted"], false);

    let resp = ws_rpc(&url, "audio.setMuted", json!({ "muted": true })).await;
    assert_eq!(resp["result"]["muted"], true);

    let resp = ws_rpc(&url, "audio.toggleMute", json!({})).await;
    assert_eq!(resp["result"]["muted"], false);

    let resp = ws_rpc(&url, "audio.setMuted", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_alert_confirm_unknown_id() {
    let (url, _ctx) = start_test_host().await;
    let resp = ws_rpc(&url, "alert.confirm", json!({ "id": "nope" })).await;
    assert_eq!(resp["error"]["code"], -32001);
}

#[tokio::test]
async fn test_sign_in_press_is_acknowledged_and_alert_flows_back() {
    let (url, ctx) = start_test_host().await;
    let (mut ws, _) = connect_async(&url).await.unwrap();

    // Empty password: flow raises the "Missing info" alert without
    // touching the (unreachable) backend.
    let request = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "auth.signIn",
        "params": { "email": "kid@example.com", "password": "" }
    });
    ws.send(Message::Text(serde_json::to_string(&request).unwrap()))
        .await
        .unwrap();

    let mut accepted = false;
    let mut alert_id = None;
    while alert_id.is_none() {
        let msg = ws.next().await.unwrap().unwrap();
        let Message::Text(text) = msg else { continue };
        let v: Value = serde_json::from_str(&text).unwrap();
        if v.get("id").is_some() {
            assert_eq!(v["result"]["accepted"], true);
            accepted = true;
        } else if v["method"] == "alert.show" {
            assert_eq!(v["params"]["title"], "Missing info");
            assert_eq!(v["params"]["subTitle"], "Please enter email and password");
            assert_eq!(v["params"]["style"], "warning");
            alert_id = Some(v["params"]["id"].as_str().unwrap().to_string());
        }
    }
    assert!(accepted);

    // Confirming over the wire resumes the flow.
    let confirm = json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "alert.confirm",
        "params": { "id": alert_id.unwrap() }
    });
    ws.send(Message::Text(serde_json::to_string(&confirm).unwrap()))
        .await
        .unwrap();
    loop {
        let msg = ws.next().await.unwrap().unwrap();
        let Message::Text(text) = msg else { continue };
        let v: Value = serde_json::from_str(&text).unwrap();
        if v["id"] == 8 {
            assert_eq!(v["result"]["confirmed"], true);
            break;
        }
    }

    // Navigation never moved
    assert_eq!(ctx.nav.current(), Screen::Splash);
}

#[tokio::test]
async fn test_intro_open_and_advance() {
    let (url, ctx) = start_test_host().await;

    let resp = ws_rpc(&url, "intro.open", json!({})).await;
    assert_eq!(resp["result"]["index"], 0);

    let resp = ws_rpc(&url, "intro.advance", json!({})).await;
    assert_eq!(resp["result"]["index"], 1);
    assert_eq!(resp["result"]["finished"], false);

    ws_rpc(&url, "intro.advance", json!({})).await;
    let resp = ws_rpc(&url, "intro.advance", json!({})).await;
    assert_eq!(resp["result"]["finished"], true);
    assert_eq!(ctx.nav.current(), Screen::SignIn);
    ctx.intro.stop_ticker();
}

// Multi-thread flavor: the health request uses blocking std I/O, which
// would starve the server task on a current-thread runtime.
#[tokio::test(flavor = "multi_thread")]
async fn test_health_endpoint_over_plain_http() {
    use std::io::{Read as _, Write as _};
    use std::net::TcpStream;

    let (url, _ctx) = start_test_host().await;
    let addr = url.trim_start_matches("ws://").to_string();

    let mut stream = TcpStream::connect(&addr).unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    let body = response.split("\r\n\r\n").nth(1).unwrap();
    let v: Value = serde_json::from_str(body).unwrap();
    assert_eq!(v["status"], "ok");
    assert_eq!(v["screen"], "Splash");
}
