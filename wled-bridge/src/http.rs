//! The reqwest-backed transport.

use crate::config::Params;
use async_trait::async_trait;
use tokio::time::Duration;
use wled_api::{
    transport::{HttpMethod, Request, Response, Transport},
    Error, Result,
};

pub struct HttpTransport {
    client: reqwest::Client,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Builds the client once with the configured timeout. WLED
    /// devices present self-signed certificates when TLS is enabled
    /// at all, so certificate validation is off, as it was in the
    /// original adapter.

    pub fn new(params: &Params) -> Result<Self> {
        static APP_USER_AGENT: &str =
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .user_agent(APP_USER_AGENT)
            .use_rustls_tls()
            .timeout(Duration::from_millis(params.timeout))
            .build()
            .map_err(|e| {
                Error::ConfigError(format!(
                    "can't create HTTP client: {}",
                    e
                ))
            })?;

        Ok(HttpTransport {
            client,
            username: params.username.clone(),
            password: params.password.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: &Request) -> Result<Response> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };
        let mut builder = self.client.request(method, &req.url);

        if !self.username.is_empty() {
            builder =
                builder.basic_auth(&self.username, Some(&self.password));
        }

        if !req.body.is_empty() {
            builder = builder.body(req.body.clone());
        }

        let rsp = builder
            .send()
            .await
            .map_err(|e| Error::TransportError(e.to_string()))?;
        let status = rsp.status().as_u16();
        let body = rsp
            .text()
            .await
            .map_err(|e| Error::TransportError(e.to_string()))?;

        Ok(Response { status, body })
    }
}
