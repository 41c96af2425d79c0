use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use feedback_utils::feedback_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let name = env!("CARGO_PKG_NAME");
    let version = feedback_version();

    format!("Feedback Form Service ({name}, Version {version})")
});

/// Shared client for all requests to form backends.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(request_timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
