//! Records as reported by vision analysis: every field optional.
//!
//! Mapping into the canonical records fills the requested identifier where the
//! analysis left it out and collapses missing flags and lists to false/empty.
use serde::Deserialize;

use crate::{
    CompanyProfile, Education, Experience, JobDetails, PersonProfile, Record, RecordKind,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BestEffortExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BestEffortEducation {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BestEffortPerson {
    pub username: Option<String>,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub experience: Option<Vec<BestEffortExperience>>,
    pub education: Option<Vec<BestEffortEducation>>,
    pub skills: Option<Vec<String>>,
    pub connection_count: Option<u64>,
    pub follower_count: Option<u64>,
    pub open_to_work: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BestEffortCompany {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub headquarters: Option<String>,
    pub founded: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub employee_count: Option<u64>,
    pub follower_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BestEffortJob {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub posted_date: Option<String>,
    pub salary: Option<String>,
    pub is_easy_apply: Option<bool>,
    #[serde(rename = "jobURL")]
    pub job_url: Option<String>,
    pub description: Option<String>,
    pub workplace_type: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub applicant_count: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffortRecord {
    Person(BestEffortPerson),
    Company(BestEffortCompany),
    Job(BestEffortJob),
}

impl BestEffortRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            BestEffortRecord::Person(_) => RecordKind::Person,
            BestEffortRecord::Company(_) => RecordKind::Company,
            BestEffortRecord::Job(_) => RecordKind::JobDetails,
        }
    }

    /// `identifier` is what the caller asked for; `source_url` is the page that was captured.
    pub fn into_record(self, identifier: &str, source_url: &str) -> Record {
        match self {
            BestEffortRecord::Person(p) => Record::Person(p.into_profile(identifier)),
            BestEffortRecord::Company(c) => Record::Company(c.into_profile(identifier)),
            BestEffortRecord::Job(j) => Record::JobDetails(j.into_details(identifier, source_url)),
        }
    }
}

impl BestEffortPerson {
    pub fn into_profile(self, requested_username: &str) -> PersonProfile {
        let mut profile = PersonProfile {
            username: non_blank(self.username).unwrap_or_else(|| requested_username.to_string()),
            name: self.name.map(|n| n.trim().to_string()).unwrap_or_default(),
            headline: non_blank(self.headline),
            about: non_blank(self.about),
            location: non_blank(self.location),
            company: non_blank(self.company),
            job_title: non_blank(self.job_title),
            experience: self
                .experience
                .unwrap_or_default()
                .into_iter()
                .filter_map(BestEffortExperience::into_experience)
                .collect(),
            education: self
                .education
                .unwrap_or_default()
                .into_iter()
                .filter_map(BestEffortEducation::into_education)
                .collect(),
            skills: Vec::new(),
            connection_count: self.connection_count,
            follower_count: self.follower_count,
            open_to_work: self.open_to_work.unwrap_or(false),
        };
        for skill in self.skills.unwrap_or_default() {
            profile.add_skill(&skill);
        }
        profile
    }
}

impl BestEffortExperience {
    // An entry with neither title nor company carries nothing worth keeping.
    fn into_experience(self) -> Option<Experience> {
        let title = non_blank(self.title);
        let company = non_blank(self.company);
        if title.is_none() && company.is_none() {
            return None;
        }
        Some(Experience {
            title: title.unwrap_or_default(),
            company: company.unwrap_or_default(),
            location: non_blank(self.location),
            start_date: non_blank(self.start_date),
            end_date: non_blank(self.end_date),
            duration: non_blank(self.duration),
            description: non_blank(self.description),
        })
    }
}

impl BestEffortEducation {
    fn into_education(self) -> Option<Education> {
        Some(Education {
            institution: non_blank(self.institution)?,
            degree: non_blank(self.degree),
            start_date: non_blank(self.start_date),
            end_date: non_blank(self.end_date),
        })
    }
}

impl BestEffortCompany {
    pub fn into_profile(self, requested_slug: &str) -> CompanyProfile {
        CompanyProfile {
            name: self.name.map(|n| n.trim().to_string()).unwrap_or_default(),
            slug: non_blank(self.slug).unwrap_or_else(|| requested_slug.to_string()),
            tagline: non_blank(self.tagline),
            about: non_blank(self.about),
            website: non_blank(self.website),
            industry: non_blank(self.industry),
            company_size: non_blank(self.company_size),
            headquarters: non_blank(self.headquarters),
            founded: non_blank(self.founded),
            specialties: clean_list(self.specialties),
            employee_count: self.employee_count,
            follower_count: self.follower_count,
        }
    }
}

impl BestEffortJob {
    pub fn into_details(self, requested_id: &str, source_url: &str) -> JobDetails {
        JobDetails {
            id: non_blank(self.id).unwrap_or_else(|| requested_id.to_string()),
            title: self.title.map(|t| t.trim().to_string()).unwrap_or_default(),
            company: non_blank(self.company).unwrap_or_default(),
            location: non_blank(self.location),
            posted_date: non_blank(self.posted_date),
            salary: non_blank(self.salary),
            is_easy_apply: self.is_easy_apply.unwrap_or(false),
            job_url: non_blank(self.job_url).unwrap_or_else(|| source_url.to_string()),
            description: non_blank(self.description),
            workplace_type: non_blank(self.workplace_type),
            employment_type: non_blank(self.employment_type),
            experience_level: non_blank(self.experience_level),
            applicant_count: non_blank(self.applicant_count),
            skills: clean_list(self.skills),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Option<Vec<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.unwrap_or_default() {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
