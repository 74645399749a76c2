//! Scout core: pure identifier, record, and protocol-shape logic.
mod best_effort;
mod classify;
mod command;
mod error;
mod identifiers;
mod payload;
mod records;
mod search;
mod signal;
mod urn;

pub use best_effort::{
    BestEffortCompany, BestEffortEducation, BestEffortExperience, BestEffortJob,
    BestEffortPerson, BestEffortRecord,
};
pub use classify::{classify_read, classify_write};
pub use command::{
    Command, CommandOutput, CompanyRequest, ConfigureRequest, InviteRequest, JobRequest,
    MessageRequest, ProfileRequest, ReadOptions, SessionStatus,
};
pub use error::{ErrorKind, ScoutError};
pub use identifiers::{extract_company_id, extract_job_id, extract_person_id};
pub use payload::{
    InvitePayload, MessagePayload, INVITE_NOTE_MAX_CHARS, MESSAGE_CREATE_KEY,
};
pub use records::{
    CompanyProfile, Education, Experience, JobDetails, JobListing, PersonProfile, Record,
    RecordKind,
};
pub use search::{JobSearchQuery, SearchLimit};
pub use signal::{has_primary_signal, is_placeholder_name, PrimarySignal, PLACEHOLDER_NAMES};
pub use urn::{Urn, UrnKind};
