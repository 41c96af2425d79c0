use std::sync::Arc;

use feedback_api_rest::RestServerConfig;
use feedback_config::{BackendConfig, Config};
use feedback_core_form_impl::FormFeatureConfig;
use feedback_extern_impl::{
    http::HttpClient,
    netlify::{NetlifyFormsApiServiceConfig, NetlifyFormsApiServiceImpl},
    statickit::{StaticKitApiServiceConfig, StaticKitApiServiceImpl},
};
use types::{FormBackendApi, FormFeature, RestServer, Template};

pub mod types;

/// Wire up the rest server and all of its dependencies from the config.
pub fn build(config: &Config) -> anyhow::Result<RestServer> {
    let http = HttpClient::new(*config.http.request_timeout)?;

    let form_backend_api = match &config.backend {
        BackendConfig::StaticKit(statickit) => {
            FormBackendApi::StaticKit(StaticKitApiServiceImpl::new(
                StaticKitApiServiceConfig::new(
                    &statickit.site,
                    &statickit.form_key,
                    statickit.endpoint_override.clone(),
                )?,
                http,
            ))
        }
        BackendConfig::Netlify(netlify) => {
            FormBackendApi::Netlify(NetlifyFormsApiServiceImpl::new(
                NetlifyFormsApiServiceConfig {
                    action: netlify.action.clone().into(),
                    form_name: netlify.form_name.as_str().into(),
                    honeypot_name: netlify.honeypot_name.as_str().into(),
                },
                http,
            ))
        }
    };

    let form_feature_config = FormFeatureConfig {
        owner_name: config.site.owner_name.as_str().into(),
        homepage: config.site.homepage.as_str().into(),
        fallback_contact: Arc::new(config.site.fallback_contact.clone()),
        honeypot: form_backend_api.uses_honeypot(),
    };

    let form = FormFeature::new(form_backend_api, Template::new()?, form_feature_config);

    Ok(RestServer::new(
        form,
        RestServerConfig {
            addr: config.http.address(),
        },
    ))
}
