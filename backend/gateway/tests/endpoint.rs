use std::io;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde_json::{json, Value};
use slashgate_commands::{CommandDispatcher, CommandSpec};
use slashgate_core::ResponseEnvelope;
use slashgate_gateway::{serve, GatewayState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestServer {
    url: String,
    _shutdown: oneshot::Sender<()>,
}

async fn spawn(dispatcher: CommandDispatcher, path: &'static str) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        serve(listener, GatewayState::new(dispatcher), path, async {
            let _ = rx.await;
        })
        .await
        .unwrap();
    });
    TestServer { url: format!("http://{addr}{path}"), _shutdown: tx }
}

fn dispatcher() -> CommandDispatcher {
    let mut d = CommandDispatcher::new();
    d.register("ping", CommandSpec::from_fn(|_| Ok(ResponseEnvelope::ephemeral("pong"))));
    d.register(
        "deploy",
        CommandSpec::from_fn(|p| {
            let target = p.get("env").unwrap_or("nowhere");
            let text = p.get("text").unwrap_or("");
            Ok(ResponseEnvelope::in_channel(format!("deploying {text} to {target}")))
        })
        .methods(["POST"])
        .token("abc")
        .param("env", "prod"),
    );
    d.register("boom", CommandSpec::from_fn(|_| Err(anyhow::anyhow!("backend down"))));
    d
}

#[tokio::test]
async fn get_ping_returns_envelope() {
    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .get(&server.url)
        .query(&[("command", "/ping")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"response_type": "ephemeral", "text": "pong", "attachments": []}));
}

#[tokio::test]
async fn post_form_reaches_handler_with_merged_params() {
    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .post(&server.url)
        .form(&[("command", "/deploy"), ("token", "abc"), ("text", "v2")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["response_type"], "in_channel");
    assert_eq!(body["text"], "deploying v2 to prod");
}

#[tokio::test]
async fn post_ignores_query_string() {
    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .post(&server.url)
        .query(&[("command", "deploy"), ("token", "abc")])
        .form(&[("command", "ping")])
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["text"], "POST request is not allowed");
}

#[tokio::test]
async fn validation_failures_are_200_replies() {
    let server = spawn(dispatcher(), "/slack").await;
    let client = reqwest::Client::new();

    let cases: [(reqwest::RequestBuilder, &str); 3] = [
        (client.get(&server.url).query(&[("command", "nope")]), "Command nope is not found"),
        (client.get(&server.url).query(&[("command", "deploy")]), "GET request is not allowed"),
        (
            client.post(&server.url).form(&[("command", "deploy"), ("token", "xyz")]),
            "Your token xyz is invalid",
        ),
    ];

    for (request, expected) in cases {
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"response_type": "ephemeral", "text": expected, "attachments": []}));
    }
}

#[tokio::test]
async fn trigger_word_is_accepted() {
    let server = spawn(dispatcher(), "/").await;
    let resp = reqwest::Client::new()
        .get(&server.url)
        .query(&[("trigger_word", "  /ping ")])
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["text"], "pong");
}

#[tokio::test]
async fn other_methods_are_rejected_by_router() {
    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .put(&server.url)
        .query(&[("command", "ping")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn handler_failure_is_server_error() {
    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .get(&server.url)
        .query(&[("command", "boom")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "backend down");
}

#[tokio::test]
async fn health_check() {
    let server = spawn(dispatcher(), "/slack").await;
    let base = server.url.trim_end_matches("/slack");
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The default test runtime is single-threaded, so the server task sees the
// scoped subscriber.
#[tokio::test]
async fn request_logs_redact_query_token() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = spawn(dispatcher(), "/slack").await;
    let resp = reqwest::Client::new()
        .get(&server.url)
        .query(&[("command", "ping"), ("token", "s3cr3t")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let output = logs.contents();
    assert!(output.contains("token=[REDACTED]"), "request span missing: {output}");
    assert!(!output.contains("s3cr3t"), "token leaked into logs: {output}");
}
