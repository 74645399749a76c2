use std::collections::HashSet;
use std::sync::Arc;

use scout_core::{
    classify_write, extract_company_id, extract_job_id, extract_person_id, Command,
    CommandOutput, CompanyProfile, ErrorKind, InvitePayload, JobDetails, JobListing,
    JobSearchQuery, MessagePayload, PersonProfile, ReadOptions, Record, RecordKind, ScoutError,
    SessionStatus, Urn,
};
use scout_logging::{scout_debug, scout_info, scout_warn};
use url::Url;

use crate::fetch::{fetch_document, Document};
use crate::parse::{parse_document, parse_job_search, ParseOutcome};
use crate::secret::SecretStore;
use crate::session::SessionHandle;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::vision::VisionFallback;
use crate::write::{invite_request, message_request};
use crate::ClientConfig;

/// Listings the platform renders per search page.
const SEARCH_PAGE_SIZE: usize = 25;
const SEARCH_MAX_PAGES: usize = 4;

const PROBE_PATH: &str = "/feed/";

/// One authenticated client: its own session, transport and collaborators.
///
/// Independent calls may run concurrently; they share nothing but read access
/// to the session token.
pub struct ScoutClient {
    config: ClientConfig,
    session: SessionHandle,
    transport: Arc<dyn Transport>,
    vision: Option<VisionFallback>,
    secrets: Option<Arc<dyn SecretStore>>,
}

impl ScoutClient {
    pub fn new(config: ClientConfig) -> Result<Self, ScoutError> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            session: SessionHandle::new(),
            transport,
            vision: None,
            secrets: None,
        }
    }

    pub fn with_vision(mut self, vision: VisionFallback) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(store);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    // ---- session ----

    /// Stores the credential (bare or `li_at=`-prefixed) and hands it to the secret store.
    pub async fn configure(&self, raw_token: &str) -> Result<(), ScoutError> {
        let token = self.session.configure(raw_token).await?;
        if let Some(store) = &self.secrets {
            if let Err(err) = store.save(&token) {
                scout_warn!("Failed to save session token: {}", err);
            }
        }
        Ok(())
    }

    /// Loads a previously saved token. Returns whether one was found.
    pub async fn restore_session(&self) -> bool {
        let Some(store) = &self.secrets else {
            return false;
        };
        match store.load() {
            Ok(Some(token)) => self.session.configure(&token).await.is_ok(),
            Ok(None) => false,
            Err(err) => {
                scout_warn!("Failed to load session token: {}", err);
                false
            }
        }
    }

    pub async fn clear_session(&self) {
        self.session.clear().await;
        if let Some(store) = &self.secrets {
            if let Err(err) = store.delete() {
                scout_warn!("Failed to delete session token: {}", err);
            }
        }
    }

    /// Live probe against an authenticated-only page.
    ///
    /// Auth, challenge and status failures answer `false`; transport failures are errors.
    pub async fn verify_session(&self) -> Result<bool, ScoutError> {
        let url = self.config.url_for(PROBE_PATH);
        match self.fetch(&url).await {
            Ok(_) => Ok(true),
            Err(err) => match err.kind {
                ErrorKind::NotAuthenticated
                | ErrorKind::SecurityChallenge
                | ErrorKind::HttpError(_) => {
                    scout_info!("Session probe failed: {}", err);
                    Ok(false)
                }
                _ => Err(err),
            },
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.status().await
    }

    // ---- reads ----

    pub async fn get_profile(
        &self,
        input: &str,
        options: ReadOptions,
    ) -> Result<PersonProfile, ScoutError> {
        let username = extract_person_id(input).ok_or_else(|| ScoutError::invalid_identifier(input))?;
        let url = self.config.url_for(&format!("/in/{username}/"));
        match self.read(RecordKind::Person, &username, &url, options).await? {
            Record::Person(profile) => Ok(profile),
            other => Err(unexpected_record(RecordKind::Person, &other)),
        }
    }

    pub async fn get_company(
        &self,
        input: &str,
        options: ReadOptions,
    ) -> Result<CompanyProfile, ScoutError> {
        let slug = extract_company_id(input).ok_or_else(|| ScoutError::invalid_identifier(input))?;
        let url = self.config.url_for(&format!("/company/{slug}/about/"));
        match self.read(RecordKind::Company, &slug, &url, options).await? {
            Record::Company(company) => Ok(company),
            other => Err(unexpected_record(RecordKind::Company, &other)),
        }
    }

    pub async fn get_job_details(
        &self,
        input: &str,
        options: ReadOptions,
    ) -> Result<JobDetails, ScoutError> {
        let job_id = extract_job_id(input).ok_or_else(|| ScoutError::invalid_identifier(input))?;
        let url = self.config.url_for(&format!("/jobs/view/{job_id}/"));
        match self.read(RecordKind::JobDetails, &job_id, &url, options).await? {
            Record::JobDetails(details) => Ok(details),
            other => Err(unexpected_record(RecordKind::JobDetails, &other)),
        }
    }

    /// Search results in document order, deduplicated by job id, at most `query.limit`.
    ///
    /// Later pages are best effort: a failure after the first page returns what
    /// was collected so far.
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> Result<Vec<JobListing>, ScoutError> {
        let limit = query.limit.get();
        let mut seen = HashSet::new();
        let mut listings = Vec::new();

        for page in 0..SEARCH_MAX_PAGES {
            let url = self.search_url(query, page * SEARCH_PAGE_SIZE)?;
            let page_listings = match self.fetch(&url).await {
                Ok(document) => parse_job_search(&document.html, &document.url),
                Err(err) => Err(err),
            };
            let page_listings = match page_listings {
                Ok(found) => found,
                Err(err) if page == 0 => return Err(err),
                Err(err) => {
                    scout_warn!("Stopping job search at page {}: {}", page, err);
                    break;
                }
            };

            let before = listings.len();
            for listing in page_listings {
                if listings.len() == limit {
                    break;
                }
                if seen.insert(listing.id.clone()) {
                    listings.push(listing);
                }
            }
            scout_debug!(
                "Job search page {} added {} listings",
                page,
                listings.len() - before
            );
            if listings.len() == limit || listings.len() == before {
                break;
            }
        }
        Ok(listings)
    }

    fn search_url(&self, query: &JobSearchQuery, start: usize) -> Result<String, ScoutError> {
        let mut url = Url::parse(&self.config.url_for("/jobs/search/"))
            .map_err(|err| ScoutError::invalid_parameter("base_url", err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("keywords", &query.keywords);
            if let Some(location) = &query.location {
                pairs.append_pair("location", location);
            }
            if start > 0 {
                pairs.append_pair("start", &start.to_string());
            }
        }
        Ok(url.into())
    }

    /// Fetch, parse, and, when allowed, fall back to vision.
    ///
    /// If vision also fails, the original fetch/parse error is what the caller sees.
    async fn read(
        &self,
        kind: RecordKind,
        identifier: &str,
        url: &str,
        options: ReadOptions,
    ) -> Result<Record, ScoutError> {
        let original = match self.fetch(url).await {
            Ok(document) => match parse_document(&document, kind, identifier) {
                Ok(ParseOutcome::Sufficient(record)) => return Ok(record),
                Ok(ParseOutcome::Insufficient(_)) => ScoutError::parse(format!(
                    "no name or title found for {kind:?} {identifier}"
                )),
                Err(err) => err,
            },
            Err(err) => err,
        };
        if !original.is_fallback_eligible() {
            return Err(original);
        }

        let fallback = options.vision_fallback.unwrap_or(self.config.vision_fallback);
        if !fallback {
            return Err(original);
        }
        let Some(vision) = &self.vision else {
            scout_debug!("No vision collaborators configured; returning {}", original);
            return Err(original);
        };

        scout_info!("Falling back to vision for {:?} {}: {}", kind, identifier, original);
        match vision.recover(identifier, kind, url).await {
            Ok(record) => Ok(record),
            Err(vision_err) => {
                scout_warn!("Vision fallback failed for {}: {}", identifier, vision_err);
                Err(original)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Document, ScoutError> {
        let token = self.session.require_token().await;
        let result = match token {
            Ok(token) => fetch_document(self.transport.as_ref(), &self.config, url, &token).await,
            Err(err) => Err(err),
        };
        self.session.record(&result).await;
        result
    }

    // ---- writes ----

    /// Sends a connection invitation. Validation failures never reach the network.
    pub async fn send_invite(&self, urn: &str, message: Option<&str>) -> Result<(), ScoutError> {
        let payload = InvitePayload::new(Urn::parse(urn)?, message)?;
        let token = self.session.require_token().await?;
        let request = invite_request(&self.config, &token, &payload)?;
        self.post(request).await?;
        scout_info!("Invitation sent to {}", payload.invitee());
        Ok(())
    }

    pub async fn send_message(&self, urn: &str, message: &str) -> Result<(), ScoutError> {
        let payload = MessagePayload::new(Urn::parse(urn)?, message)?;
        let token = self.session.require_token().await?;
        let request = message_request(&self.config, &token, &payload)?;
        self.post(request).await?;
        scout_info!("Message sent to {}", payload.recipient());
        Ok(())
    }

    async fn post(&self, request: HttpRequest) -> Result<(), ScoutError> {
        let url = request.url.clone();
        let result = match self.transport.send(request).await {
            Ok(response) => classify_write(&response.resolved_path(), response.status),
            Err(err) => Err(err),
        };
        self.session.record(&result).await;
        if let Err(err) = &result {
            scout_warn!("POST {} failed: {}", url, err);
        }
        result
    }

    // ---- typed dispatch ----

    pub async fn execute(&self, command: Command) -> Result<CommandOutput, ScoutError> {
        scout_debug!("Executing {}", command.name());
        match command {
            Command::GetProfile(req) => self
                .get_profile(&req.input, req.options)
                .await
                .map(CommandOutput::Profile),
            Command::GetCompany(req) => self
                .get_company(&req.input, req.options)
                .await
                .map(CommandOutput::Company),
            Command::SearchJobs(query) => self.search_jobs(&query).await.map(CommandOutput::Jobs),
            Command::GetJobDetails(req) => self
                .get_job_details(&req.input, req.options)
                .await
                .map(CommandOutput::JobDetails),
            Command::SendInvite(req) => self
                .send_invite(&req.urn, req.message.as_deref())
                .await
                .map(|()| CommandOutput::Sent),
            Command::SendMessage(req) => self
                .send_message(&req.urn, &req.message)
                .await
                .map(|()| CommandOutput::Sent),
            Command::Configure(req) => self
                .configure(&req.token)
                .await
                .map(|()| CommandOutput::Configured),
            Command::VerifySession => self.verify_session().await.map(CommandOutput::Verified),
            Command::Status => Ok(CommandOutput::Status(self.status().await)),
        }
    }
}

fn unexpected_record(expected: RecordKind, got: &Record) -> ScoutError {
    ScoutError::parse(format!(
        "expected {expected:?} record, got {:?}",
        got.kind()
    ))
}
