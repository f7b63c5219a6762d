//! Integration tests for the `td` CLI.
//!
//! Each test points XDG_CONFIG_HOME at a temp directory, runs `td` as a
//! subprocess, and checks its output and the stored session file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

fn session_path(config_home: &Path) -> PathBuf {
    config_home.join("taskdeck").join("session.json")
}

fn store_session(config_home: &Path, token: &str) {
    let path = session_path(config_home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        json!({"token": token, "id": 1, "username": "ann", "roles": ["ROLE_USER"]}).to_string(),
    )
    .unwrap();
}

/// Run `td` with the given args against an isolated config directory.
async fn td(config_home: &Path, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_td"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

/// Run `td` with `input` piped to stdin.
async fn td_with_stdin(config_home: &Path, args: &[&str], input: &str) -> Output {
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_td"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);
    child.wait_with_output().await.unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer good-token")
}

fn rejected() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Error: Unauthorized"})),
    )
        .into_response()
}

async fn sign_in(Json(body): Json<Value>) -> Response {
    if body["password"] == "pw" {
        Json(json!({"token": "good-token", "id": 1, "username": body["username"],
                    "roles": ["ROLE_USER"]}))
        .into_response()
    } else {
        rejected()
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!({"id": 1, "username": "ann", "fullName": "Ann Lee"})).into_response()
}

async fn projects(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!([{"id": 1, "name": "Apollo", "status": "IN_PROGRESS"}])).into_response()
}

async fn tasks(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!([
        {"id": 10, "title": "Ship it", "status": "DONE", "priority": 3},
        {"id": 11, "title": "Test it", "status": "TODO", "priority": 4, "overdue": true}
    ]))
    .into_response()
}

/// Last task body the backend was asked to store
type Replaced = Arc<Mutex<Option<Value>>>;

async fn task_by_id(headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!({
        "id": id, "title": "Test it", "description": "end to end", "status": "IN_PROGRESS",
        "priority": 4, "progressPercentage": 40, "dueDate": "2025-04-01T00:00:00",
        "projectId": 1, "projectName": "Apollo", "assignee": {"id": 2, "username": "bob"}
    }))
    .into_response()
}

async fn replace_task(
    State(replaced): State<Replaced>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    *replaced.lock().unwrap() = Some(body.clone());
    Json(json!({"id": id, "title": body["title"], "status": body["status"],
                "priority": body["priority"]}))
    .into_response()
}

async fn spawn_backend() -> String {
    spawn_backend_recording().await.0
}

async fn spawn_backend_recording() -> (String, Replaced) {
    let replaced = Replaced::default();
    let app = Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/users/me", get(me))
        .route("/api/projects/user", get(projects))
        .route("/api/tasks/assigned", get(tasks))
        .route("/api/tasks/{id}", get(task_by_id).put(replace_task))
        .with_state(replaced.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), replaced)
}

// ---------------------------------------------------------------------------
// Offline behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn view_without_session_asks_for_sign_in() {
    let tmp = TempDir::new().unwrap();
    let out = td(tmp.path(), &["dashboard"]).await;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("sign in with `td login <username>`"));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");

    let out = td(tmp.path(), &["logout"]).await;
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "Signed out");
    assert!(!session_path(tmp.path()).exists());

    let out = td(tmp.path(), &["logout"]).await;
    assert!(out.status.success());
}

#[tokio::test]
async fn logout_works_with_a_broken_config() {
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");
    fs::write(tmp.path().join("taskdeck").join("config.toml"), "[api\n").unwrap();

    let out = td(tmp.path(), &["logout"]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(!session_path(tmp.path()).exists());

    // other commands still report the bad file
    let out = td(tmp.path(), &["dashboard"]).await;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("could not parse config.toml"));
}

#[tokio::test]
async fn logout_ignores_a_bad_api_url() {
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");
    let out = td(tmp.path(), &["--api-url", "not a url", "--json", "logout"]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let message: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(message["message"], "Signed out");
    assert!(!session_path(tmp.path()).exists());
}

#[tokio::test]
async fn bad_sort_key_is_rejected_before_any_request() {
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");
    // nothing listens here; the error must come from argument checking
    let out = td(
        tmp.path(),
        &["--api-url", "http://127.0.0.1:9", "tasks", "--sort", "size"],
    )
    .await;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("invalid sort key 'size'"));
    assert!(session_path(tmp.path()).exists());
}

#[tokio::test]
async fn bad_status_filter_lists_valid_tokens() {
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");
    let out = td(
        tmp.path(),
        &["--api-url", "http://127.0.0.1:9", "tasks", "--status", "archived"],
    )
    .await;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("TODO, IN_PROGRESS, REVIEW, DONE, BLOCKED"));
}

// ---------------------------------------------------------------------------
// Against the fake backend
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn login_stores_session_and_dashboard_uses_it() {
    let base = spawn_backend().await;
    let tmp = TempDir::new().unwrap();

    let out = td(
        tmp.path(),
        &["--api-url", &base, "--json", "login", "ann", "--password", "pw"],
    )
    .await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let login: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(login["username"], "ann");
    assert_eq!(login["roles"], json!(["USER"]));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(session_path(tmp.path())).unwrap()).unwrap();
    assert_eq!(stored["token"], "good-token");

    let out = td(tmp.path(), &["--api-url", &base, "--json", "dashboard"]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let dashboard: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(dashboard["stats"]["total_tasks"], 2);
    assert_eq!(dashboard["stats"]["completion_rate"], 50);
    assert_eq!(dashboard["task_status"]["DONE"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_session_is_forgotten() {
    let base = spawn_backend().await;
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "stale-token");

    let out = td(tmp.path(), &["--api-url", &base, "whoami"]).await;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("sign in with `td login <username>`"));
    assert!(!session_path(tmp.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_keeps_no_session() {
    let base = spawn_backend().await;
    let tmp = TempDir::new().unwrap();

    let out = td(
        tmp.path(),
        &["--api-url", &base, "login", "ann", "--password", "nope"],
    )
    .await;
    assert!(!out.status.success());
    assert!(!session_path(tmp.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn piped_password_signs_in() {
    let base = spawn_backend().await;
    let tmp = TempDir::new().unwrap();

    let out = td_with_stdin(tmp.path(), &["--api-url", &base, "login", "ann"], "pw\n").await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "Signed in as ann");
    assert!(session_path(tmp.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn task_edit_keeps_fields_not_given() {
    let (base, replaced) = spawn_backend_recording().await;
    let tmp = TempDir::new().unwrap();
    store_session(tmp.path(), "good-token");

    let out = td(
        tmp.path(),
        &["--api-url", &base, "--json", "task", "edit", "11", "--title", "Test it well"],
    )
    .await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let body = replaced.lock().unwrap().clone().expect("task was replaced");
    assert_eq!(
        body,
        json!({
            "title": "Test it well", "description": "end to end", "status": "IN_PROGRESS",
            "priority": 4, "dueDate": "2025-04-01T00:00:00", "projectId": 1,
            "assigneeId": 2, "progressPercentage": 40
        })
    );
}
