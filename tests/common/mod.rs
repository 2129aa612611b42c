#![allow(dead_code)]

use std::sync::Arc;

use kitakita_client::auth::{MemoryStore, Session, SessionManager, UserProfile};
use kitakita_client::config::ClientOptions;
use kitakita_client::Kitakita;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn client(server: &MockServer) -> Kitakita {
    Kitakita::new(ClientOptions::default().with_base_url(&server.uri())).unwrap()
}

pub fn user_json() -> Value {
    json!({
        "userId": 42,
        "email": "ana@example.com",
        "fullName": "Ana Cruz",
        "role": "ADMIN",
        "createdAt": "2025-01-05T08:30:00",
        "lastLogin": null
    })
}

pub fn auth_json() -> Value {
    let mut body = user_json();
    body["token"] = json!(TOKEN);
    body["type"] = json!("Bearer");
    body
}

pub fn user() -> UserProfile {
    serde_json::from_value(user_json()).unwrap()
}

/// Client plus a manager already holding a session
pub fn signed_in(server: &MockServer) -> (Kitakita, SessionManager, Arc<MemoryStore>) {
    let client = client(server);
    let store = Arc::new(MemoryStore::new());
    let mut manager = client.session_manager(store.clone());
    manager
        .set_session(Session {
            token: TOKEN.to_string(),
            user: user(),
        })
        .unwrap();
    (client, manager, store)
}

/// Spring-style page envelope
pub fn page_json(content: Value, page: u32, total_pages: u32) -> Value {
    let len = content.as_array().map(|rows| rows.len()).unwrap_or(0);
    json!({
        "content": content,
        "page": page,
        "size": 10,
        "totalElements": len,
        "totalPages": total_pages,
        "hasNext": page + 1 < total_pages,
        "hasPrevious": page > 0
    })
}
