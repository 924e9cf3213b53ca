//! Platform HTTP primitive behind the API facade.
//!
//! The browser build implements [`Transport`] over `fetch`; the native tester
//! implements it over `reqwest`. Everything above this seam is shared.
use async_trait::async_trait;
use std::fmt;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; sent with `Content-Type: application/json` when present.
    pub body: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            body: None,
        }
    }

    #[must_use]
    pub fn post_json(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            body: Some(body),
        }
    }

    #[must_use]
    pub fn delete(url: String) -> Self {
        Self {
            method: HttpMethod::Delete,
            url,
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Issue one request and collect the full response body.
    ///
    /// # Errors
    ///
    /// Returns an error when no HTTP response was received at all.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
