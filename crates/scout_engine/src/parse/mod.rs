//! Structural parsers: raw documents into typed records.
//!
//! Missing optional fields never fail a parse. The only soft failure is a
//! record without its primary name/title ([`ParseOutcome::Insufficient`]); the
//! only hard failure is a document with no usable structure at all.
mod company;
mod dom;
mod jobs;
mod person;

use scout_core::{has_primary_signal, PrimarySignal, Record, RecordKind, ScoutError};
use scraper::Html;

use crate::fetch::Document;

pub use company::parse_company;
pub use jobs::{job_view_url, parse_job_details, parse_job_search};
pub use person::parse_person;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Sufficient(T),
    /// Extraction ran but the primary field is empty or a placeholder.
    Insufficient(T),
}

impl<T: PrimarySignal> ParseOutcome<T> {
    pub fn judge(record: T) -> Self {
        if has_primary_signal(&record) {
            ParseOutcome::Sufficient(record)
        } else {
            ParseOutcome::Insufficient(record)
        }
    }
}

impl<T> ParseOutcome<T> {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, ParseOutcome::Sufficient(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            ParseOutcome::Sufficient(record) | ParseOutcome::Insufficient(record) => record,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Sufficient(record) => ParseOutcome::Sufficient(f(record)),
            ParseOutcome::Insufficient(record) => ParseOutcome::Insufficient(f(record)),
        }
    }
}

/// Dispatches on `kind`; `identifier` is the canonical id the document was fetched for.
pub fn parse_document(
    document: &Document,
    kind: RecordKind,
    identifier: &str,
) -> Result<ParseOutcome<Record>, ScoutError> {
    match kind {
        RecordKind::Person => Ok(parse_person(&document.html, identifier)?.map(Record::Person)),
        RecordKind::Company => Ok(parse_company(&document.html, identifier)?.map(Record::Company)),
        RecordKind::JobDetails => Ok(
            parse_job_details(&document.html, identifier, &document.url)?.map(Record::JobDetails),
        ),
    }
}

/// Parses `html`, rejecting bodies with nothing to extract from.
pub(crate) fn load(html: &str) -> Result<Html, ScoutError> {
    if html.trim().is_empty() {
        return Err(ScoutError::parse("empty document"));
    }
    let doc = Html::parse_document(html);
    let has_content = dom::selector("body")
        .and_then(|sel| doc.select(&sel).next())
        .map(|body| body.children().next().is_some())
        .unwrap_or(false);
    if !has_content {
        return Err(ScoutError::parse("document has no body content"));
    }
    Ok(doc)
}
