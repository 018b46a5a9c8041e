//! Conversation backend over browser `fetch()` via gloo-net.
//!
//! Cookies are not forwarded; every call carries the bearer credential.

use async_trait::async_trait;
use gloo_net::http::Request;

use watch_core::ports::{HttpPort, HttpResponse};
use watch_types::{Result, WatchError};

#[derive(Default)]
pub struct GlooHttp;

impl GlooHttp {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpPort for GlooHttp {
    async fn get(&self, url: &str, bearer: &str) -> Result<HttpResponse> {
        let response = Request::get(url)
            .header("Authorization", &format!("Bearer {}", bearer))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| WatchError::Network(format!("{}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WatchError::Network(format!("Failed to read body from {}: {}", url, e)))?;
        log::debug!("GET {} -> {}", url, status);

        Ok(HttpResponse { status, body })
    }
}
