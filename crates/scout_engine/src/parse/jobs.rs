use std::collections::HashSet;

use scout_core::{extract_job_id, has_primary_signal, JobDetails, JobListing, ScoutError};
use scraper::ElementRef;
use url::Url;

use super::dom::{
    all_elements, contains_ignore_case, element_text, first_element, first_multiline,
    first_text, split_list,
};
use super::{load, ParseOutcome};

const CARD: &str = "[data-entity-urn*=\"jobPosting\"], [data-occludable-job-id], [data-job-id]";

const CARD_TITLE: &[&str] = &[
    "h3.base-search-card__title",
    ".job-card-list__title",
    "a.job-card-container__link strong",
    ".artdeco-entity-lockup__title",
    "a.job-card-container__link",
];

const CARD_COMPANY: &[&str] = &[
    "h4.base-search-card__subtitle",
    ".artdeco-entity-lockup__subtitle",
    ".job-card-container__primary-description",
    ".job-card-container__company-name",
];

const CARD_LOCATION: &[&str] = &[
    "span.job-search-card__location",
    ".job-card-container__metadata-item",
    ".artdeco-entity-lockup__caption li",
    ".artdeco-entity-lockup__caption",
];

const CARD_SALARY: &[&str] = &[
    "span.job-search-card__salary-info",
    ".job-card-container__metadata-item--salary",
];

const DETAIL_TOP_CARD: &[&str] = &[
    ".job-details-jobs-unified-top-card",
    ".jobs-unified-top-card",
    "section.top-card-layout",
    ".top-card-layout",
];

const DETAIL_TITLE: &[&str] = &[
    "h1.top-card-layout__title",
    "h1.topcard__title",
    ".job-details-jobs-unified-top-card__job-title h1",
    "h1.t-24",
    "h1",
];

const DETAIL_COMPANY: &[&str] = &[
    "a.topcard__org-name-link",
    ".topcard__flavor a",
    ".job-details-jobs-unified-top-card__company-name a",
    ".job-details-jobs-unified-top-card__company-name",
    "span.topcard__flavor",
];

const DETAIL_LOCATION: &[&str] = &[
    "span.topcard__flavor--bullet",
    ".job-details-jobs-unified-top-card__primary-description-container .tvm__text",
    ".job-details-jobs-unified-top-card__bullet",
];

const DETAIL_POSTED: &[&str] = &[
    "span.posted-time-ago__text",
    ".jobs-unified-top-card__posted-date",
];

const DETAIL_APPLICANTS: &[&str] = &[
    "figcaption.num-applicants__caption",
    "span.num-applicants__caption",
    ".jobs-unified-top-card__applicant-count",
];

const DETAIL_DESCRIPTION: &[&str] = &[
    "div.show-more-less-html__markup",
    "div.description__text",
    "#job-details",
    "div.jobs-description__content",
    ".jobs-description-content__text",
];

const DETAIL_SALARY: &[&str] = &["div.salary.compensation__salary", ".compensation__salary"];

const DETAIL_INSIGHTS: &str = ".job-details-jobs-unified-top-card__job-insight, \
     .job-details-preferences-and-skills__pill, .job-details-fit-level-preferences button";

const DETAIL_SKILLS: &str = ".job-details-how-you-match__skills-item-subtitle";

const WORKPLACE_TYPES: &[&str] = &["Remote", "Hybrid", "On-site"];
const EMPLOYMENT_TYPES: &[&str] = &[
    "Full-time",
    "Part-time",
    "Contract",
    "Temporary",
    "Internship",
    "Volunteer",
];
const EXPERIENCE_LEVELS: &[&str] = &[
    "Mid-Senior level",
    "Entry level",
    "Associate",
    "Director",
    "Executive",
    "Internship",
];

/// Canonical detail-page URL for `job_id` on the host of `page_url`.
pub fn job_view_url(page_url: &str, job_id: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(&format!("/jobs/view/{job_id}/")))
        .map(String::from)
        .unwrap_or_else(|_| format!("/jobs/view/{job_id}/"))
}

/// Listings in document order, deduplicated by id.
///
/// Cards missing an id or a title are skipped; a page with no cards is an
/// empty result, not an error.
pub fn parse_job_search(html: &str, page_url: &str) -> Result<Vec<JobListing>, ScoutError> {
    let doc = load(html)?;
    let root = doc.root_element();

    let mut seen = HashSet::new();
    let mut listings = Vec::new();
    let mut cards = all_elements(root, CARD)
        .into_iter()
        .filter_map(|card| parse_card(card, page_url))
        .peekable();
    let candidates: Vec<JobListing> = if cards.peek().is_some() {
        cards.collect()
    } else {
        anchor_listings(root, page_url)
    };

    for listing in candidates {
        if has_primary_signal(&listing) && seen.insert(listing.id.clone()) {
            listings.push(listing);
        }
    }
    Ok(listings)
}

fn parse_card(card: ElementRef<'_>, page_url: &str) -> Option<JobListing> {
    let id = card_id(card)?;
    let title = first_text(card, CARD_TITLE)?;
    Some(JobListing {
        job_url: job_view_url(page_url, &id),
        id,
        title,
        company: first_text(card, CARD_COMPANY).unwrap_or_default(),
        location: first_text(card, CARD_LOCATION),
        posted_date: posted_date(card),
        salary: first_text(card, CARD_SALARY),
        is_easy_apply: contains_ignore_case(&element_text(card), "easy apply"),
    })
}

fn card_id(card: ElementRef<'_>) -> Option<String> {
    let attrs = card.value();
    if let Some(urn) = attrs.attr("data-entity-urn") {
        if let Some(id) = urn.rsplit(':').next().filter(|id| is_digits(id)) {
            return Some(id.to_string());
        }
    }
    for name in ["data-occludable-job-id", "data-job-id"] {
        if let Some(id) = attrs.attr(name).map(str::trim).filter(|id| is_digits(id)) {
            return Some(id.to_string());
        }
    }
    all_elements(card, "a[href*=\"/jobs/view/\"]")
        .into_iter()
        .filter_map(|link| link.value().attr("href"))
        .find_map(extract_job_id)
}

fn posted_date(card: ElementRef<'_>) -> Option<String> {
    let time = first_element(card, &["time"])?;
    time.value()
        .attr("datetime")
        .map(str::to_string)
        .or_else(|| Some(element_text(time)))
        .filter(|text| !text.is_empty())
}

// Last resort for markup without card containers: every job link is a listing.
fn anchor_listings(root: ElementRef<'_>, page_url: &str) -> Vec<JobListing> {
    all_elements(root, "a[href*=\"/jobs/view/\"]")
        .into_iter()
        .filter_map(|link| {
            let id = extract_job_id(link.value().attr("href")?)?;
            Some(JobListing {
                job_url: job_view_url(page_url, &id),
                id,
                title: element_text(link),
                ..JobListing::default()
            })
        })
        .collect()
}

pub fn parse_job_details(
    html: &str,
    job_id: &str,
    page_url: &str,
) -> Result<ParseOutcome<JobDetails>, ScoutError> {
    let doc = load(html)?;
    let root = doc.root_element();
    let top_card = first_element(root, DETAIL_TOP_CARD).unwrap_or(root);

    let mut details = JobDetails::new(job_id, job_view_url(page_url, job_id));
    details.title = first_text(top_card, DETAIL_TITLE)
        .or_else(|| first_text(root, DETAIL_TITLE))
        .unwrap_or_default();
    details.company = first_text(top_card, DETAIL_COMPANY).unwrap_or_default();
    details.location = first_text(top_card, DETAIL_LOCATION);
    details.posted_date = first_text(root, DETAIL_POSTED);
    details.applicant_count = first_text(root, DETAIL_APPLICANTS);
    details.description = first_multiline(root, DETAIL_DESCRIPTION);
    details.salary = first_text(root, DETAIL_SALARY);
    details.is_easy_apply = contains_ignore_case(&element_text(top_card), "easy apply")
        || all_elements(root, ".jobs-apply-button")
            .into_iter()
            .any(|button| contains_ignore_case(&element_text(button), "easy apply"));

    apply_criteria(&mut details, root);
    apply_insights(&mut details, root);
    details.skills = required_skills(root, details.description.as_deref());

    Ok(ParseOutcome::judge(details))
}

// Guest pages: "Seniority level" / "Employment type" criteria list.
fn apply_criteria(details: &mut JobDetails, root: ElementRef<'_>) {
    for item in all_elements(root, "li.description__job-criteria-item") {
        let (Some(label), Some(value)) = (
            first_text(item, &[".description__job-criteria-subheader", "h3"]),
            first_text(item, &[".description__job-criteria-text", "span"]),
        ) else {
            continue;
        };
        match label.to_lowercase().as_str() {
            "seniority level" => details.experience_level.get_or_insert(value),
            "employment type" => details.employment_type.get_or_insert(value),
            _ => continue,
        };
    }
}

// Member pages: unlabeled pills such as "Remote", "Full-time", "$150K/yr".
fn apply_insights(details: &mut JobDetails, root: ElementRef<'_>) {
    let insights: Vec<String> = all_elements(root, DETAIL_INSIGHTS)
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();

    for text in &insights {
        if details.workplace_type.is_none() {
            details.workplace_type = known_value(text, WORKPLACE_TYPES);
        }
        if details.employment_type.is_none() {
            details.employment_type = known_value(text, EMPLOYMENT_TYPES);
        }
        if details.experience_level.is_none() {
            details.experience_level = known_value(text, EXPERIENCE_LEVELS);
        }
        if details.salary.is_none() && looks_like_salary(text) {
            details.salary = Some(text.clone());
        }
    }
}

fn known_value(text: &str, values: &[&str]) -> Option<String> {
    values
        .iter()
        .find(|value| contains_ignore_case(text, value))
        .map(|value| value.to_string())
}

fn looks_like_salary(text: &str) -> bool {
    text.contains(['$', '€', '£']) && (text.contains("/yr") || text.contains("/hr"))
}

fn required_skills(root: ElementRef<'_>, description: Option<&str>) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for element in all_elements(root, DETAIL_SKILLS) {
        for skill in split_list(&element_text(element)) {
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }
    }
    if !skills.is_empty() {
        return skills;
    }
    // Some postings carry an explicit "Skills: a, b, c" line in the description.
    description
        .and_then(|text| {
            text.lines()
                .find_map(|line| line.trim().strip_prefix("Skills:").map(split_list))
        })
        .unwrap_or_default()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
