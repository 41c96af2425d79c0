use feedback_config::{BackendConfig, Config};
use tracing::info;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let backend = match &config.backend {
        BackendConfig::StaticKit(statickit) => {
            format!("statickit (site {}, form {})", statickit.site, statickit.form_key)
        }
        BackendConfig::Netlify(netlify) => {
            format!("netlify ({}, form {})", netlify.action, netlify.form_name)
        }
    };
    info!("Submitting feedback to {backend}");

    let server = environment::build(&config)?;
    server.serve().await
}
