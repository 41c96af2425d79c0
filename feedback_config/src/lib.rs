use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use feedback_models::email_address::EmailAddress;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files that are layered on top of the
/// default config.
pub const CONFIG_PATHS_ENV: &str = "FEEDBACK_CONFIG";

pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Some(extra) = std::env::var_os(CONFIG_PATHS_ENV) {
        paths.extend(std::env::split_paths(&extra).filter(|p| !p.as_os_str().is_empty()));
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Load the given config files and apply the inline toml `overrides` last.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub site: SiteConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Timeout for requests to the form backend.
    pub request_timeout: Duration,
}

impl HttpConfig {
    pub fn address(&self) -> SocketAddr {
        (self.host, self.port).into()
    }
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub owner_name: String,
    pub homepage: Url,
    pub fallback_contact: EmailAddress,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    StaticKit(StaticKitConfig),
    Netlify(NetlifyConfig),
}

#[derive(Debug, Deserialize)]
pub struct StaticKitConfig {
    pub site: String,
    #[serde(default = "default_form_name")]
    pub form_key: String,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct NetlifyConfig {
    pub action: Url,
    #[serde(default = "default_form_name")]
    pub form_name: String,
    #[serde(default = "default_honeypot_name")]
    pub honeypot_name: String,
}

fn default_form_name() -> String {
    "feedback".into()
}

fn default_honeypot_name() -> String {
    feedback_models::form::HONEYPOT_FIELD.into()
}
