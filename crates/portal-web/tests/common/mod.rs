use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use portal_access::{AccessPolicy, Role};
use portal_auth::{PrincipalStore, SqlitePrincipalStore, create_jwt};
use portal_web::{AppState, build_router};

pub const SECRET: &str = "test-secret";

pub async fn app() -> (Router, Arc<SqlitePrincipalStore>) {
    app_with_policy(AccessPolicy::builtin()).await
}

pub async fn app_with_policy(policy: AccessPolicy) -> (Router, Arc<SqlitePrincipalStore>) {
    let store = Arc::new(SqlitePrincipalStore::open_in_memory().expect("store"));
    store.migrate().await.expect("migrate");
    let state = Arc::new(AppState {
        policy: Arc::new(policy),
        store: store.clone(),
        jwt_secret: SECRET.to_string(),
        guarded_prefixes: vec!["/admin".to_string(), "/user".to_string()],
    });
    (build_router(state), store)
}

pub fn token(subject: &str, role: Option<Role>, permissions: Option<&[&str]>) -> String {
    create_jwt(
        subject,
        role.map(|r| r.as_str()),
        permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        3600,
        SECRET,
    )
    .expect("token")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {t}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn read_body(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
