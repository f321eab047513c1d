//! The real `ProxyClient` against the proxy router served on a local port.

use std::sync::Arc;

use api::{proxy, FetchError, MemoryBackend, ProxyClient};
use serde_json::{json, Value};

fn user(id: &str, username: &str, full_name: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-03-01T10:00:00+00:00",
        "email": format!("{username}@example.com"),
        "username": username,
        "full_name": full_name,
        "job_title": "Engineer",
        "company": null,
        "department": "Platform",
        "bio": null,
        "last_sign_in_at": null
    })
}

async fn serve(backend: MemoryBackend) -> ProxyClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = proxy::router(Arc::new(backend));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ProxyClient::new(format!("http://{addr}"))
}

fn seeded() -> MemoryBackend {
    MemoryBackend::new().with_rows(
        "users",
        vec![
            user("1", "ali_r", "Ali Rezaei"),
            user("2", "aliakbar", "Aliakbar Karimi"),
            user("3", "sara", "Sara Ahmadi"),
        ],
    )
}

#[tokio::test]
async fn test_search_returns_validated_profiles() {
    let client = serve(seeded()).await;

    let users = client.search_users("  Ali ").await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.full_name.as_str()).collect();
    assert_eq!(names, ["Ali Rezaei", "Aliakbar Karimi"]);
}

#[tokio::test]
async fn test_list_then_update_then_delete() {
    let backend = seeded();
    let client = serve(backend.clone()).await;

    let users = client.list_users().await.unwrap();
    assert_eq!(users.len(), 3);

    let mut sara = users[2].clone();
    sara.job_title = "Staff Engineer".into();
    let stored = client.update_user(&sara).await.unwrap();
    assert_eq!(stored, sara);

    client.delete_user(&sara).await.unwrap();
    assert_eq!(backend.rows("users").len(), 2);
}

#[tokio::test]
async fn test_update_of_missing_row_reports_backend_message() {
    let client = serve(seeded()).await;

    let users = client.list_users().await.unwrap();
    let mut ghost = users[0].clone();
    ghost.id = "404".into();
    ghost.username = "ghost".into();

    match client.update_user(&ghost).await {
        Err(FetchError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "No record found or updated");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_rows_missing_required_fields_are_invalid() {
    let backend = MemoryBackend::new().with_rows(
        "users",
        vec![json!({"id": "1", "username": "ali", "full_name": "Ali"})],
    );
    let client = serve(backend).await;

    let err = client.search_users("Ali").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidFormat(_)));
}
