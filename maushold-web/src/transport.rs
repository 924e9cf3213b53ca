//! Browser `fetch` behind the core [`Transport`] seam.
use async_trait::async_trait;
use maushold_core::{HttpApi, HttpRequest, HttpResponse, Transport, TransportError};

/// Stateless transport over `window.fetch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (status, body) =
            crate::dom::fetch_text(request.method.as_str(), &request.url, request.body.as_deref())
                .await
                .map_err(|err| TransportError(crate::dom::js_error_message(&err)))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError(format!(
            "fetch is unavailable outside the browser ({} {})",
            request.method, request.url
        )))
    }
}

/// Facade wired to the browser transport and the build's addressing.
#[must_use]
pub fn browser_api() -> HttpApi<FetchTransport> {
    HttpApi::new(FetchTransport, crate::paths::api_config())
}
