use scout_core::{is_placeholder_name, Education, Experience, PersonProfile, ScoutError};
use scraper::ElementRef;

use super::dom::{
    all_elements, clean_text, contains_ignore_case, element_text, find_count, find_section,
    first_element, first_multiline, first_text, title_lead, visible_spans,
};
use super::{load, ParseOutcome};

const TOP_CARD: &[&str] = &[".pv-top-card", "section.top-card-layout", ".top-card-layout"];

const NAME: &[&str] = &[
    "h1.text-heading-xlarge",
    "h1.top-card-layout__title",
    ".pv-top-card h1",
    "main h1",
    "h1",
];

const HEADLINE: &[&str] = &[
    "div.text-body-medium.break-words",
    "h2.top-card-layout__headline",
    ".top-card-layout__headline",
];

const LOCATION: &[&str] = &[
    "span.text-body-small.inline.t-black--light.break-words",
    ".pv-text-details__left-panel span.text-body-small",
    "div.top-card__subline-item",
    "span.top-card__subline-item",
];

const ABOUT: &[&str] = &[
    "div.inline-show-more-text span[aria-hidden=\"true\"]",
    ".pv-shared-text-with-see-more span[aria-hidden=\"true\"]",
    "div.core-section-container__content p",
    "p",
];

const CURRENT_COMPANY: &[&str] = &[
    "[data-section=\"currentPositionsDetails\"] .top-card-link__description",
    "[data-section=\"currentPositionsDetails\"] span",
];

const GUEST_EXPERIENCE_ITEM: &str = "li.experience-item, li.profile-section-card";
const GUEST_EDUCATION_ITEM: &str = "li.education__list-item, li.profile-section-card";
const MEMBER_ITEM: &str = "li.artdeco-list__item";

pub fn parse_person(html: &str, username: &str) -> Result<ParseOutcome<PersonProfile>, ScoutError> {
    let doc = load(html)?;
    let root = doc.root_element();
    let top_card = first_element(root, TOP_CARD).unwrap_or(root);

    let mut profile = PersonProfile::new(username);
    profile.name = first_text(top_card, NAME)
        .or_else(|| first_text(root, NAME))
        .filter(|name| !is_placeholder_name(name))
        .or_else(|| title_lead(&doc))
        .unwrap_or_default();
    profile.headline = first_text(top_card, HEADLINE);
    profile.location = first_text(top_card, LOCATION);
    profile.about = find_section(root, "about", &["summary"])
        .and_then(|section| first_multiline(section, ABOUT));

    if let Some(section) = find_section(root, "experience", &["experience"]) {
        profile.experience = parse_experience(section);
    }
    if let Some(section) = find_section(root, "education", &["education"]) {
        profile.education = parse_education(section);
    }
    if let Some(section) = find_section(root, "skills", &["skills"]) {
        for skill in parse_skills(section) {
            profile.add_skill(&skill);
        }
    }

    profile.connection_count = find_count(top_card, "connections");
    profile.follower_count = find_count(top_card, "followers");
    profile.open_to_work = is_open_to_work(root, top_card);
    fill_current_position(&mut profile, top_card);

    Ok(ParseOutcome::judge(profile))
}

fn parse_experience(section: ElementRef<'_>) -> Vec<Experience> {
    let guest_items = all_elements(section, GUEST_EXPERIENCE_ITEM);
    if !guest_items.is_empty() {
        return guest_items.into_iter().filter_map(guest_experience).collect();
    }
    all_elements(section, MEMBER_ITEM)
        .into_iter()
        .filter_map(member_experience)
        .collect()
}

fn guest_experience(item: ElementRef<'_>) -> Option<Experience> {
    let title = first_text(item, &[".experience-item__title", ".profile-section-card__title"])?;
    let company = first_text(
        item,
        &[".experience-item__subtitle", ".profile-section-card__subtitle"],
    )
    .unwrap_or_default();
    let dates = first_text(item, &["span.date-range"])
        .map(|text| parse_date_line(&text))
        .unwrap_or_default();
    Some(Experience {
        title,
        company,
        location: first_text(item, &[".experience-item__location"]),
        start_date: dates.start,
        end_date: dates.end,
        duration: dates.duration,
        description: first_multiline(
            item,
            &[
                ".show-more-less-text__text--less",
                ".experience-item__description",
                ".show-more-less-text",
            ],
        ),
    })
}

// Member markup gives no field classes, only an ordered run of visible spans:
// title, "Company · Employment type", date line, location, description.
fn member_experience(item: ElementRef<'_>) -> Option<Experience> {
    let mut spans = visible_spans(item).into_iter();
    let title = spans.next()?;
    let company = spans
        .next()
        .map(|line| line.split(" · ").next().unwrap_or_default().to_string())
        .unwrap_or_default();

    let mut experience = Experience {
        title,
        company,
        ..Experience::default()
    };
    for line in spans {
        if experience.start_date.is_none() && is_date_line(&line) {
            let dates = parse_date_line(&line);
            experience.start_date = dates.start;
            experience.end_date = dates.end;
            experience.duration = dates.duration;
        } else if experience.location.is_none() && experience.description.is_none() && line.len() < 80
        {
            experience.location = Some(line);
        } else if experience.description.is_none() {
            experience.description = Some(line);
        }
    }
    Some(experience)
}

fn parse_education(section: ElementRef<'_>) -> Vec<Education> {
    let guest_items = all_elements(section, GUEST_EDUCATION_ITEM);
    if !guest_items.is_empty() {
        return guest_items
            .into_iter()
            .filter_map(|item| {
                let institution = first_text(
                    item,
                    &[".education__item--school-name", ".profile-section-card__title", "h3"],
                )?;
                let dates = first_text(item, &["span.date-range"])
                    .map(|text| parse_date_line(&text))
                    .unwrap_or_default();
                Some(Education {
                    institution,
                    degree: first_text(
                        item,
                        &[".education__item--degree-info", ".profile-section-card__subtitle", "h4"],
                    ),
                    start_date: dates.start,
                    end_date: dates.end,
                })
            })
            .collect();
    }

    all_elements(section, MEMBER_ITEM)
        .into_iter()
        .filter_map(|item| {
            let mut spans = visible_spans(item).into_iter();
            let mut education = Education {
                institution: spans.next()?,
                ..Education::default()
            };
            for line in spans {
                if education.start_date.is_none() && is_date_line(&line) {
                    let dates = parse_date_line(&line);
                    education.start_date = dates.start;
                    education.end_date = dates.end;
                } else if education.degree.is_none() && education.start_date.is_none() {
                    education.degree = Some(line);
                }
            }
            Some(education)
        })
        .collect()
}

fn parse_skills(section: ElementRef<'_>) -> Vec<String> {
    let guest: Vec<String> = all_elements(section, ".skills__item, li.skill")
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();
    if !guest.is_empty() {
        return guest;
    }
    all_elements(section, MEMBER_ITEM)
        .into_iter()
        .filter_map(|item| visible_spans(item).into_iter().next())
        .collect()
}

fn is_open_to_work(root: ElementRef<'_>, top_card: ElementRef<'_>) -> bool {
    let framed = all_elements(root, "img[alt]").into_iter().any(|img| {
        img.value()
            .attr("alt")
            .is_some_and(|alt| alt.contains("OPEN_TO_WORK"))
    });
    framed || contains_ignore_case(&element_text(top_card), "open to work")
}

/// Current company and title: explicit top-card data, then an ongoing first
/// position, then a `<title> at <company>` headline.
fn fill_current_position(profile: &mut PersonProfile, top_card: ElementRef<'_>) {
    profile.company = first_text(top_card, CURRENT_COMPANY).or_else(|| {
        first_element(top_card, &["button[aria-label^=\"Current company\"]"])
            .and_then(|button| button.value().attr("aria-label"))
            .and_then(company_from_aria_label)
    });

    let current = profile
        .experience
        .first()
        .filter(|exp| exp.end_date.as_deref().map_or(true, is_present));
    if let Some(current) = current {
        if profile.company.is_none() && !current.company.is_empty() {
            profile.company = Some(current.company.clone());
        }
        if profile.job_title.is_none() {
            profile.job_title = Some(current.title.clone());
        }
    }

    if let Some((title, company)) = profile.headline.as_deref().and_then(split_headline) {
        if profile.job_title.is_none() {
            profile.job_title = Some(title);
        }
        if profile.company.is_none() {
            profile.company = Some(company);
        }
    }
}

// "Current company: Acme Corp. Click to skip to experience card"
fn company_from_aria_label(label: &str) -> Option<String> {
    let (_, rest) = label.split_once(':')?;
    let company = rest.split(". ").next().unwrap_or(rest);
    let company = clean_text(company.trim_end_matches('.'));
    (!company.is_empty()).then_some(company)
}

fn split_headline(headline: &str) -> Option<(String, String)> {
    let (title, company) = headline.split_once(" at ")?;
    let company = company.split(['|', '·', ',']).next().unwrap_or(company);
    let (title, company) = (clean_text(title), clean_text(company));
    (!title.is_empty() && !company.is_empty()).then_some((title, company))
}

fn is_present(value: &str) -> bool {
    value.eq_ignore_ascii_case("present")
}

#[derive(Debug, Default, PartialEq, Eq)]
struct DateLine {
    start: Option<String>,
    end: Option<String>,
    duration: Option<String>,
}

fn is_date_line(line: &str) -> bool {
    line.len() < 60
        && (contains_ignore_case(line, "present")
            || line.split(|c: char| !c.is_ascii_digit()).any(|run| {
                run.len() == 4 && (run.starts_with("19") || run.starts_with("20"))
            }))
}

/// `Jan 2020 - Present · 4 yrs 2 mos` into start, end and duration.
fn parse_date_line(line: &str) -> DateLine {
    let line = clean_text(line);
    let (range, duration) = match line.split_once(" · ") {
        Some((range, duration)) => (range.to_string(), Some(clean_text(duration))),
        None => split_trailing_duration(&line),
    };
    let mut bounds = range
        .split(['-', '–'])
        .map(clean_text)
        .filter(|part| !part.is_empty());
    DateLine {
        start: bounds.next(),
        end: bounds.next(),
        duration: duration.filter(|d| !d.is_empty()),
    }
}

// Guest markup renders the duration without a separator: "Jan 2020 - Present 4 years".
fn split_trailing_duration(line: &str) -> (String, Option<String>) {
    const UNITS: &[&str] = &[" yr", " year", " mo", " month"];
    let lower = line.to_ascii_lowercase();
    let Some(unit_at) = UNITS.iter().filter_map(|unit| lower.find(unit)).min() else {
        return (line.to_string(), None);
    };
    let head = &line[..unit_at];
    let number_start = head
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    // A unit with no count in front ("more") is not a duration.
    if number_start == unit_at {
        return (line.to_string(), None);
    }
    let range = line[..number_start].trim().to_string();
    let duration = line[number_start..].trim().to_string();
    (range, Some(duration))
}
