// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use formflow_server::{
    build_router, ApiConfig, AppState, FixedBackoff, RetryPolicy, Upstream, UpstreamError,
};
use formflow_store::Store;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Default)]
struct ScriptedUpstream {
    calls: AtomicUsize,
    succeed_on: Option<usize>,
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.succeed_on == Some(call) {
            return Ok(json!({"totalUsers": 1234, "source": url}));
        }
        Err(UpstreamError(format!("connection refused (call {call})")))
    }
}

async fn spawn_with(upstream: Arc<ScriptedUpstream>, url: Option<&str>) -> std::net::SocketAddr {
    let store = Store::open_in_memory().expect("open store");
    let api = ApiConfig {
        token_secret: Some("proxy-secret-0123456789".to_string()),
        external_totalusers_url: url.map(str::to_string),
        external_retry: RetryPolicy {
            max_attempts: 3,
            backoff: FixedBackoff { delay_ms: 1 },
        },
        ..ApiConfig::default()
    };
    let app = build_router(AppState::with_upstream(Arc::new(store), api, upstream));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn get(addr: std::net::SocketAddr, path: &str) -> (u16, Value) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, serde_json::from_str(body).expect("json body"))
}

#[tokio::test]
async fn failing_upstream_is_retried_then_falls_back() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let addr = spawn_with(upstream.clone(), Some("http://upstream.invalid/users")).await;

    let (status, body) = get(addr, "/api/external/totalusers").await;
    assert_eq!(status, 200);
    assert_eq!(body["totalUsers"], 0);
    assert_eq!(body["message"], "Mock data due to external API failure");
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn upstream_success_on_a_retry_is_proxied() {
    let upstream = Arc::new(ScriptedUpstream {
        succeed_on: Some(2),
        ..ScriptedUpstream::default()
    });
    let addr = spawn_with(upstream.clone(), Some("http://upstream.invalid/users")).await;

    let (status, body) = get(addr, "/api/external/totalusers").await;
    assert_eq!(status, 200);
    assert_eq!(body["totalUsers"], 1234);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unconfigured_upstream_serves_the_fallback_without_calls() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let addr = spawn_with(upstream.clone(), None).await;

    let (status, body) = get(addr, "/api/external/totalusers").await;
    assert_eq!(status, 200);
    assert_eq!(body["totalUsers"], 0);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
}
