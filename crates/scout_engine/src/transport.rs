use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use scout_core::{ErrorKind, ScoutError};
use scout_logging::scout_trace;

use crate::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

/// Raw response after redirects; classification happens above the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Path of the resolved URL, or the whole URL if it does not parse.
    pub fn resolved_path(&self) -> String {
        url::Url::parse(&self.final_url)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| self.final_url.clone())
    }
}

/// The network collaborator every read and write goes through.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ScoutError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ScoutError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .map_err(|err| ScoutError::new(ErrorKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    fn too_large(&self, actual: u64) -> ScoutError {
        ScoutError::new(
            ErrorKind::InvalidResponse,
            format!("response too large (max {}, actual {actual})", self.max_bytes),
        )
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ScoutError> {
        let url = reqwest::Url::parse(&request.url).map_err(|err| {
            ScoutError::invalid_parameter("url", format!("{}: {err}", request.url))
        })?;
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }
        scout_trace!("{} -> {} ({} bytes)", request.url, status, body.len());

        Ok(HttpResponse {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ScoutError {
    if err.is_timeout() {
        return ScoutError::new(ErrorKind::Timeout, err.to_string());
    }
    // Redirect loops are what an expired session looks like on some pages.
    if err.is_redirect() {
        return ScoutError::new(ErrorKind::InvalidResponse, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return ScoutError::new(ErrorKind::InvalidResponse, err.to_string());
    }
    ScoutError::new(ErrorKind::Network, err.to_string())
}
