#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use client::{
    Gateway, MemoryStorage, SessionManager, SessionStore, navigator::RecordingNavigator,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port and return the API base URL.
pub async fn spawn_api(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}/api/v1")
}

pub fn gateway(base_url: &str) -> Gateway {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    Gateway::with_client(base_url, reqwest::Client::new(), store)
}

pub fn session(base_url: &str) -> (SessionManager, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let manager = SessionManager::new(gateway(base_url), navigator.clone());
    (manager, navigator)
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": 7,
        "first_name": "Ada",
        "last_name": "Obi",
        "email": "ada@example.com",
        "role": role,
    })
}

pub fn auth_json(token: &str, role: &str) -> Value {
    json!({
        "status": "success",
        "data": { "token": token, "user": user_json(role) },
    })
}
