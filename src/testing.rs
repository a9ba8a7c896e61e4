/// Local upstream helpers for async tests
use crate::clients::ApodClient;
use crate::config::{Credential, DEFAULT_API_PATH};
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;

/// Serve `router` on an ephemeral loopback port
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn client_for(addr: SocketAddr) -> ApodClient {
    let credential = Credential::new("test-key", addr.to_string(), DEFAULT_API_PATH);
    ApodClient::with_scheme("http", credential, Duration::from_secs(5)).unwrap()
}

pub fn apod_json(date: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "title": title,
        "explanation": "Explanation",
        "url": format!("https://apod.nasa.gov/apod/image/{}.jpg", date),
        "hdurl": format!("https://apod.nasa.gov/apod/image/{}_hd.jpg", date),
        "media_type": "image",
        "service_version": "v1"
    })
}
