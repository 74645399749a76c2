use serde::{Deserialize, Serialize};

/// Which record a read produces; also tells the vision analyzer what to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Person,
    Company,
    JobDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub username: String,
    pub name: String,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub connection_count: Option<u64>,
    pub follower_count: Option<u64>,
    pub open_to_work: bool,
}

impl PersonProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Adds a skill unless it is blank or already present; keeps first-seen order.
    pub fn add_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return;
        }
        self.skills.push(skill.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub headquarters: Option<String>,
    pub founded: Option<String>,
    pub specialties: Vec<String>,
    pub employee_count: Option<u64>,
    pub follower_count: Option<u64>,
}

impl CompanyProfile {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }
}

/// One search hit. `id` is the identity used for deduplication and detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub posted_date: Option<String>,
    pub salary: Option<String>,
    pub is_easy_apply: bool,
    #[serde(rename = "jobURL")]
    pub job_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub posted_date: Option<String>,
    pub salary: Option<String>,
    pub is_easy_apply: bool,
    #[serde(rename = "jobURL")]
    pub job_url: String,
    pub description: Option<String>,
    pub workplace_type: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub applicant_count: Option<String>,
    pub skills: Vec<String>,
}

impl JobDetails {
    pub fn new(id: impl Into<String>, job_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            job_url: job_url.into(),
            ..Self::default()
        }
    }
}

/// Any single record a read can return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Record {
    Person(PersonProfile),
    Company(CompanyProfile),
    JobDetails(JobDetails),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Person(_) => RecordKind::Person,
            Record::Company(_) => RecordKind::Company,
            Record::JobDetails(_) => RecordKind::JobDetails,
        }
    }
}
