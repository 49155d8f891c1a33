// SPDX-License-Identifier: Apache-2.0

use formflow_server::{build_router, ApiConfig, AppState};
use formflow_store::Store;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn spawn_app() -> std::net::SocketAddr {
    let store = Store::open_in_memory().expect("open store");
    let api = ApiConfig {
        token_secret: Some("e2e-secret-0123456789".to_string()),
        ..ApiConfig::default()
    };
    let app = build_router(AppState::new(Arc::new(store), api));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    method: &str,
    addr: std::net::SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&Value>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let payload = body.map(Value::to_string).unwrap_or_default();
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if body.is_some() {
        req.push_str("Content-Type: application/json\r\n");
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n{payload}", payload.len()));
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
    (status, head.to_string(), body.to_string())
}

fn json_body(body: &str) -> Value {
    serde_json::from_str(body).expect("json body")
}

async fn register_and_login(addr: std::net::SocketAddr, email: &str, role: &str) -> String {
    let (status, _, _) = send_raw(
        "POST",
        addr,
        "/api/auth/register",
        &[],
        Some(&json!({
            "username": email.split('@').next().unwrap_or("user"),
            "email": email,
            "password": "hunter22",
            "confirmPassword": "hunter22",
            "role": role
        })),
    )
    .await;
    assert_eq!(status, 201);
    let (status, _, body) = send_raw(
        "POST",
        addr,
        "/api/auth/login",
        &[],
        Some(&json!({"email": email, "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, 200, "{body}");
    json_body(&body)["token"]
        .as_str()
        .expect("token")
        .to_string()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

async fn create_form(addr: std::net::SocketAddr, admin: &str, form: Value) -> String {
    let auth = bearer(admin);
    let (status, _, body) = send_raw(
        "POST",
        addr,
        "/api/forms",
        &[("Authorization", &auth)],
        Some(&form),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    json_body(&body)["_id"].as_str().expect("form id").to_string()
}

#[tokio::test]
async fn healthz_fallback_and_request_id_echo() {
    let addr = spawn_app().await;

    let (status, head, body) = send_raw("GET", addr, "/healthz", &[], None).await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
    assert!(head.to_ascii_lowercase().contains("x-request-id: req-"));

    let (status, head, body) = send_raw(
        "GET",
        addr,
        "/api/nope",
        &[("x-request-id", "trace-42")],
        None,
    )
    .await;
    assert_eq!(status, 404);
    assert!(head.to_ascii_lowercase().contains("x-request-id: trace-42"));
    let parsed = json_body(&body);
    assert_eq!(parsed["message"], "API route not found");
    assert_eq!(parsed["error"]["code"], "NotFound");
    assert_eq!(parsed["error"]["request_id"], "trace-42");

    let (status, _, body) = send_raw("GET", addr, "/elsewhere", &[], None).await;
    assert_eq!(status, 404);
    assert_eq!(json_body(&body)["message"], "Route not found");
}

#[tokio::test]
async fn auth_flow_and_role_checks() {
    let addr = spawn_app().await;
    let admin = register_and_login(addr, "boss@org.in", "admin").await;
    let employee = register_and_login(addr, "asha@org.in", "employee").await;

    let (status, _, body) = send_raw(
        "POST",
        addr,
        "/api/auth/register",
        &[],
        Some(&json!({
            "username": "again",
            "email": "ASHA@org.in",
            "password": "x",
            "confirmPassword": "x",
            "role": "employee"
        })),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(json_body(&body)["message"], "Email already registered");

    let (status, _, body) = send_raw(
        "POST",
        addr,
        "/api/auth/login",
        &[],
        Some(&json!({"email": "asha@org.in", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json_body(&body)["message"], "Invalid credentials");

    let auth = bearer(&employee);
    let (status, _, body) =
        send_raw("GET", addr, "/api/auth/profile", &[("Authorization", &auth)], None).await;
    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["email"], "asha@org.in");

    let (status, _, _) =
        send_raw("GET", addr, "/api/admin/dashboard", &[("Authorization", &auth)], None).await;
    assert_eq!(status, 403);

    let admin_auth = bearer(&admin);
    let (status, _, body) = send_raw(
        "GET",
        addr,
        "/api/admin/dashboard",
        &[("Authorization", &admin_auth)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["message"], "Welcome to the Admin Dashboard");

    let (status, _, body) = send_raw(
        "GET",
        addr,
        "/api/auth/profile",
        &[("Authorization", "Bearer v1.garbage.sig")],
        None,
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json_body(&body)["message"], "Invalid or expired token");

    let (status, _, _) = send_raw("GET", addr, "/api/auth/profile", &[], None).await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn employees_only_see_targeted_forms() {
    let addr = spawn_app().await;
    let admin = register_and_login(addr, "boss@org.in", "admin").await;
    let employee = register_and_login(addr, "ravi@org.in", "employee").await;

    let (status, _, body) = send_raw(
        "POST",
        addr,
        "/api/employee/register",
        &[],
        Some(&json!({
            "employeeId": "EMP-001",
            "employeeName": "Ravi",
            "email": "ravi@org.in",
            "department": "Engineering",
            "level": "L2"
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    assert!(json_body(&body)["employee"]["userId"].is_string());

    let question = json!([{"type": "short", "title": "How is it going?", "required": true}]);
    let engineering = create_form(
        addr,
        &admin,
        json!({
            "title": "Engineering pulse",
            "createdBy": "boss",
            "isPublished": true,
            "questions": question,
            "targetDepartments": ["engineering"]
        }),
    )
    .await;
    let sales = create_form(
        addr,
        &admin,
        json!({
            "title": "Sales pulse",
            "createdBy": "boss",
            "isPublished": true,
            "questions": question,
            "targetDepartments": ["Sales"]
        }),
    )
    .await;

    let auth = bearer(&employee);
    let (status, _, body) = send_raw(
        "GET",
        addr,
        "/api/employee/targeted-forms",
        &[("Authorization", &auth)],
        None,
    )
    .await;
    assert_eq!(status, 200, "{body}");
    let ids: Vec<String> = json_body(&body)
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["_id"].as_str().map(str::to_string))
        .collect();
    assert_eq!(ids, vec![engineering.clone()]);

    let (status, _, _) = send_raw(
        "GET",
        addr,
        &format!("/api/forms/{engineering}"),
        &[("Authorization", &auth)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    let (status, _, _) = send_raw(
        "GET",
        addr,
        &format!("/api/forms/{sales}"),
        &[("Authorization", &auth)],
        None,
    )
    .await;
    assert_eq!(status, 403);

    let (status, _, body) = send_raw(
        "GET",
        addr,
        "/api/employee/debug-targeted-forms",
        &[("Authorization", &auth)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    let forms = json_body(&body)["forms"].as_array().cloned().unwrap_or_default();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms.iter().filter(|f| f["visible"] == true).count(), 1);
}

#[tokio::test]
async fn one_response_limit_and_unpublished_forms() {
    let addr = spawn_app().await;
    let admin = register_and_login(addr, "boss@org.in", "admin").await;
    let question = json!([{"type": "short", "title": "Feedback", "required": true}]);
    let open = create_form(
        addr,
        &admin,
        json!({
            "title": "Exit survey",
            "createdBy": "boss",
            "isPublished": true,
            "settings": {"limitOneResponse": true},
            "questions": question
        }),
    )
    .await;
    let draft = create_form(
        addr,
        &admin,
        json!({"title": "Draft", "createdBy": "boss", "questions": question}),
    )
    .await;

    let answer = json!({
        "formId": open,
        "respondentEmail": "meera@org.in",
        "answers": [{"questionId": "q0", "value": "all good"}]
    });
    let (status, _, body) = send_raw("POST", addr, "/api/responses", &[], Some(&answer)).await;
    assert_eq!(status, 201, "{body}");
    let (status, _, body) = send_raw("POST", addr, "/api/responses", &[], Some(&answer)).await;
    assert_eq!(status, 400);
    assert_eq!(json_body(&body)["error"]["code"], "AlreadySubmitted");

    let blank = json!({"formId": open, "respondentEmail": "kiran@org.in", "answers": []});
    let (status, _, _) = send_raw("POST", addr, "/api/responses", &[], Some(&blank)).await;
    assert_eq!(status, 400);

    let closed = json!({"formId": draft, "answers": [{"questionId": "q0", "value": "x"}]});
    let (status, _, body) = send_raw("POST", addr, "/api/responses", &[], Some(&closed)).await;
    assert_eq!(status, 403);
    assert_eq!(json_body(&body)["message"], "Form is not accepting responses");

    let admin_auth = bearer(&admin);
    let (status, _, body) = send_raw(
        "GET",
        addr,
        "/api/responses/summary",
        &[("Authorization", &admin_auth)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    let summary = json_body(&body);
    assert_eq!(summary["totalForms"], 2);
    assert_eq!(summary["totalResponses"], 1);
}

#[tokio::test]
async fn cors_allowlist_is_enforced() {
    let addr = spawn_app().await;
    let (status, head, _) = send_raw(
        "OPTIONS",
        addr,
        "/api/forms",
        &[("Origin", "http://localhost:3000")],
        None,
    )
    .await;
    assert_eq!(status, 204);
    assert!(head
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: http://localhost:3000"));

    let (status, _, _) = send_raw(
        "GET",
        addr,
        "/healthz",
        &[("Origin", "https://evil.example")],
        None,
    )
    .await;
    assert_eq!(status, 403);
}
