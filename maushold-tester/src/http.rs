//! Native HTTP transport for running scenarios against a live gateway.
use async_trait::async_trait;
use maushold_core::{
    ApiConfig, HttpApi, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError,
};
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

const fn method_for(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        log::debug!("{} {}", request.method, request.url);
        let mut builder = self
            .client
            .request(method_for(request.method), &request.url);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| TransportError(format!("{} {}: {err}", request.method, request.url)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Facade for a gateway deployment at `base_url`.
pub fn gateway_api(base_url: &str) -> HttpApi<ReqwestTransport> {
    HttpApi::new(ReqwestTransport::new(), ApiConfig::gateway(base_url))
}
