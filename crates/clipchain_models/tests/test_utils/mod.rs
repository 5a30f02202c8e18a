//! Test utilities for provider client tests.
//!
//! Provider clients are exercised against a throwaway axum server bound to
//! an ephemeral localhost port.

use axum::Router;

/// Serve `router` on 127.0.0.1 and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub server failed");
    });
    format!("http://{}", addr)
}
