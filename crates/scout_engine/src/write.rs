//! Request construction for the platform's internal write API.
use scout_core::{InvitePayload, MessagePayload, ScoutError};

use crate::fetch::session_cookie;
use crate::transport::{HttpMethod, HttpRequest};
use crate::ClientConfig;

pub const INVITE_PATH: &str =
    "/voyager/api/voyagerRelationshipsDashMemberRelationships?action=verifyQuotaAndCreateV2";
pub const MESSAGE_PATH: &str = "/voyager/api/messaging/conversations?action=create";

const ACCEPT_NORMALIZED: &str = "application/vnd.linkedin.normalized+json+2.1";

/// Header set required by the internal REST layer.
pub fn internal_api_headers(config: &ClientConfig, token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Cookie", session_cookie(token)),
        ("User-Agent", config.user_agent.clone()),
        ("Content-Type", "application/json".to_string()),
        ("Accept", ACCEPT_NORMALIZED.to_string()),
        ("X-RestLi-Protocol-Version", "2.0.0".to_string()),
        ("X-Li-Lang", "en_US".to_string()),
    ]
}

pub fn invite_request(
    config: &ClientConfig,
    token: &str,
    payload: &InvitePayload,
) -> Result<HttpRequest, ScoutError> {
    post(config, token, INVITE_PATH, payload)
}

pub fn message_request(
    config: &ClientConfig,
    token: &str,
    payload: &MessagePayload,
) -> Result<HttpRequest, ScoutError> {
    post(config, token, MESSAGE_PATH, payload)
}

fn post<T: serde::Serialize>(
    config: &ClientConfig,
    token: &str,
    path: &str,
    payload: &T,
) -> Result<HttpRequest, ScoutError> {
    let body = serde_json::to_vec(payload)
        .map_err(|err| ScoutError::invalid_parameter("payload", err.to_string()))?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: config.url_for(path),
        headers: internal_api_headers(config, token),
        body: Some(body),
    })
}
