use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use feedback_core_form_contracts::FormFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Form> {
    form: Form,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Form> RestServer<Form>
where
    Form: FormFeatureService,
{
    pub fn new(form: Form, config: RestServerConfig) -> Self {
        Self { form, config }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Starting http server on {addr}");
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener, ignoring the configured address.
    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::feedback::router(self.form.into()));

        // the request id has to be assigned before the trace span is created
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::panic_handler::add(router)
    }
}
