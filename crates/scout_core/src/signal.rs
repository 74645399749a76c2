//! The sufficiency rule: a record is usable only if its primary name/title is real.
use crate::{CompanyProfile, JobDetails, JobListing, PersonProfile, Record};

/// Values the platform renders in place of a real name on gated or error pages.
pub const PLACEHOLDER_NAMES: &[&str] = &[
    "linkedin",
    "linkedin member",
    "sign in",
    "sign up",
    "join linkedin",
    "log in",
    "security verification",
];

pub trait PrimarySignal {
    /// The name/title field that decides whether a record counts as extracted.
    fn primary_field(&self) -> &str;
}

impl PrimarySignal for PersonProfile {
    fn primary_field(&self) -> &str {
        &self.name
    }
}

impl PrimarySignal for CompanyProfile {
    fn primary_field(&self) -> &str {
        &self.name
    }
}

impl PrimarySignal for JobListing {
    fn primary_field(&self) -> &str {
        &self.title
    }
}

impl PrimarySignal for JobDetails {
    fn primary_field(&self) -> &str {
        &self.title
    }
}

impl PrimarySignal for Record {
    fn primary_field(&self) -> &str {
        match self {
            Record::Person(r) => r.primary_field(),
            Record::Company(r) => r.primary_field(),
            Record::JobDetails(r) => r.primary_field(),
        }
    }
}

pub fn is_placeholder_name(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || PLACEHOLDER_NAMES
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(value))
}

/// True when the record's primary field is present and not a placeholder.
pub fn has_primary_signal<R: PrimarySignal + ?Sized>(record: &R) -> bool {
    !is_placeholder_name(record.primary_field())
}
