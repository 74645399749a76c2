//! Authenticated document fetch: browser-identity headers, classification, decoding.
use scout_core::{classify_read, ScoutError};
use scout_logging::scout_debug;

use crate::decode::decode_body;
use crate::transport::{HttpMethod, HttpRequest, Transport};
use crate::ClientConfig;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// A decoded page, kept together with where it actually came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub html: String,
}

pub(crate) fn session_cookie(token: &str) -> String {
    format!("li_at={token}")
}

/// Header set sent with every document GET.
pub fn browser_headers(config: &ClientConfig, token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Cookie", session_cookie(token)),
        ("User-Agent", config.user_agent.clone()),
        ("Accept", ACCEPT_HTML.to_string()),
        ("Accept-Language", ACCEPT_LANGUAGE.to_string()),
        ("Accept-Encoding", ACCEPT_ENCODING.to_string()),
        ("DNT", "1".to_string()),
        ("Sec-Fetch-Dest", "document".to_string()),
        ("Sec-Fetch-Mode", "navigate".to_string()),
        ("Sec-Fetch-Site", "none".to_string()),
    ]
}

/// Fetches `url` with the session cookie and classifies the outcome.
///
/// Single attempt; the caller decides whether a failure is worth a fallback.
pub async fn fetch_document(
    transport: &dyn Transport,
    config: &ClientConfig,
    url: &str,
    token: &str,
) -> Result<Document, ScoutError> {
    let request = HttpRequest {
        method: HttpMethod::Get,
        url: url.to_string(),
        headers: browser_headers(config, token),
        body: None,
    };
    let response = transport.send(request).await?;
    let resolved_path = response.resolved_path();
    scout_debug!(
        "GET {} resolved={} status={}",
        url,
        resolved_path,
        response.status
    );
    classify_read(&resolved_path, response.status)?;

    let html = decode_body(&response.body, response.content_type.as_deref())?;
    Ok(Document {
        url: response.final_url,
        html,
    })
}
