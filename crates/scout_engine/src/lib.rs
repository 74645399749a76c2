//! Scout engine: session handling, authenticated fetches, page parsing, vision
//! fallback and write-protocol emulation.
mod client;
mod config;
mod decode;
mod fetch;
mod parse;
mod runner;
mod secret;
mod session;
mod transport;
mod vision;
mod write;

pub use client::ScoutClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use decode::decode_body;
pub use fetch::{browser_headers, fetch_document, Document};
pub use parse::{
    job_view_url, parse_company, parse_document, parse_job_details, parse_job_search,
    parse_person, ParseOutcome,
};
pub use runner::{CommandCompleted, CommandRunner, RequestId};
pub use secret::{FileSecretStore, MemorySecretStore, SecretStore, SecretStoreError};
pub use session::{normalize_token, SessionHandle};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use vision::{ImageHandle, ScreenCapture, VisionAnalyzer, VisionFallback};
pub use write::{internal_api_headers, invite_request, message_request, INVITE_PATH, MESSAGE_PATH};
