use scout_core::{is_placeholder_name, CompanyProfile, ScoutError};
use scraper::ElementRef;

use super::dom::{
    all_elements, count_before, element_text, find_count, first_element, first_multiline,
    first_text, split_list, title_lead,
};
use super::{load, ParseOutcome};

const TOP_CARD: &[&str] = &[".org-top-card", "section.top-card-layout", ".top-card-layout"];

const NAME: &[&str] = &[
    "h1.org-top-card-summary__title",
    "h1.top-card-layout__title",
    ".org-top-card-summary__title",
    "h1",
];

const TAGLINE: &[&str] = &[
    "p.org-top-card-summary__tagline",
    "h4.top-card-layout__second-subline",
    ".org-top-card-summary__tagline",
];

const ABOUT: &[&str] = &[
    "section.org-about-module p",
    "p[data-test-id=\"about-us__description\"]",
    "section.org-page-details-module__card-spacing p.break-words",
    "section.artdeco-card p.break-words",
];

const INFO_ITEMS: &str = ".org-top-card-summary-info-list__info-item";

pub fn parse_company(html: &str, slug: &str) -> Result<ParseOutcome<CompanyProfile>, ScoutError> {
    let doc = load(html)?;
    let root = doc.root_element();
    let top_card = first_element(root, TOP_CARD).unwrap_or(root);

    let mut company = CompanyProfile::new(slug);
    company.name = first_text(top_card, NAME)
        .or_else(|| first_text(root, NAME))
        .filter(|name| !is_placeholder_name(name))
        .or_else(|| title_lead(&doc))
        .unwrap_or_default();
    company.tagline = first_text(top_card, TAGLINE);
    company.about = first_multiline(root, ABOUT);

    for dl in all_elements(root, "dl") {
        apply_details(&mut company, dl);
    }
    apply_info_items(&mut company, top_card);

    if company.employee_count.is_none() {
        company.employee_count = all_elements(root, "a[href*=\"/search/results/people\"]")
            .into_iter()
            .find_map(|link| count_before(&element_text(link), "employees"))
            .or_else(|| find_count(top_card, "employees"));
    }
    if company.follower_count.is_none() {
        company.follower_count = find_count(top_card, "followers");
    }

    Ok(ParseOutcome::judge(company))
}

/// Walks `dt`/`dd` pairs of an about-page definition list.
///
/// A second `dd` under "Company size" is the on-platform member count.
fn apply_details(company: &mut CompanyProfile, dl: ElementRef<'_>) {
    let mut label = String::new();
    let mut values_seen = 0;
    for node in all_elements(dl, "dt, dd") {
        let text = element_text(node);
        if node.value().name() == "dt" {
            label = text.to_lowercase();
            values_seen = 0;
            continue;
        }
        values_seen += 1;
        if text.is_empty() {
            continue;
        }
        let slot = match label.as_str() {
            "website" => &mut company.website,
            "industry" | "industries" => &mut company.industry,
            "company size" => {
                if values_seen > 1 {
                    company.employee_count = company
                        .employee_count
                        .or_else(|| count_before(&text, "associated members"))
                        .or_else(|| count_before(&text, "on linkedin"));
                    continue;
                }
                &mut company.company_size
            }
            "headquarters" => &mut company.headquarters,
            "founded" => &mut company.founded,
            "specialties" => {
                if company.specialties.is_empty() {
                    company.specialties = split_list(&text);
                }
                continue;
            }
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }
}

// Member top card lists "Industry · Headquarters · N followers · M employees".
fn apply_info_items(company: &mut CompanyProfile, top_card: ElementRef<'_>) {
    let items: Vec<String> = all_elements(top_card, INFO_ITEMS)
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();
    let mut plain = items.iter().filter(|text| {
        !text.chars().next().is_some_and(|c| c.is_ascii_digit())
            && !text.to_lowercase().contains("followers")
            && !text.to_lowercase().contains("employees")
    });
    if company.industry.is_none() {
        company.industry = plain.next().cloned();
    } else {
        plain.next();
    }
    if company.headquarters.is_none() {
        company.headquarters = plain.next().cloned();
    }
}
