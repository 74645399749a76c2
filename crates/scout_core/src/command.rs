//! Typed operations an adapter (CLI, remote-procedure layer) can request.
//!
//! Adapters map their own argument shapes onto these structs; the engine only
//! ever sees the typed form.
use serde::Serialize;

use crate::{CompanyProfile, JobDetails, JobListing, JobSearchQuery, PersonProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Overrides the client-wide vision fallback setting for one call.
    pub vision_fallback: Option<bool>,
}

impl ReadOptions {
    pub fn without_fallback() -> Self {
        Self {
            vision_fallback: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    /// Slug or profile URL.
    pub input: String,
    pub options: ReadOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRequest {
    /// Slug or company URL.
    pub input: String,
    pub options: ReadOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    /// Numeric id or job URL.
    pub input: String,
    pub options: ReadOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    pub urn: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    pub urn: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetProfile(ProfileRequest),
    GetCompany(CompanyRequest),
    SearchJobs(JobSearchQuery),
    GetJobDetails(JobRequest),
    SendInvite(InviteRequest),
    SendMessage(MessageRequest),
    Configure(ConfigureRequest),
    VerifySession,
    Status,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetProfile(_) => "get_profile",
            Command::GetCompany(_) => "get_company",
            Command::SearchJobs(_) => "search_jobs",
            Command::GetJobDetails(_) => "get_job_details",
            Command::SendInvite(_) => "send_invite",
            Command::SendMessage(_) => "send_message",
            Command::Configure(_) => "configure",
            Command::VerifySession => "verify_session",
            Command::Status => "status",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Command::SendInvite(_) | Command::SendMessage(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub configured: bool,
    pub last_probe_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CommandOutput {
    Profile(PersonProfile),
    Company(CompanyProfile),
    Jobs(Vec<JobListing>),
    JobDetails(JobDetails),
    Sent,
    Configured,
    Verified(bool),
    Status(SessionStatus),
}
