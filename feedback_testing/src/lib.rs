//! Local stand-ins for the hosted form backends.

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

pub mod netlify;
pub mod statickit;

/// Submissions with an email address on this domain make the fake backends
/// answer with a server error.
pub const FAILING_EMAIL_DOMAIN: &str = "@fail.test";

/// Submissions with an email address on this domain are rejected with a
/// validation error by the statickit fake.
pub const REJECTED_EMAIL_DOMAIN: &str = "@reject.test";

/// Submissions with an email address on this domain are rejected by the
/// statickit fake with an error that is not bound to a field.
pub const LIMITED_EMAIL_DOMAIN: &str = "@limit.test";

/// Submissions with an email address on this domain get a 422 from the
/// statickit fake whose body is not json.
pub const GARBLED_EMAIL_DOMAIN: &str = "@garbled.test";

pub async fn start_server(host: IpAddr, port: u16, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Serve `router` on a random local port in the background.
pub async fn spawn(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((IpAddr::from([127, 0, 0, 1]), 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(addr)
}
