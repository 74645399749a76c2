//! Turns loose user input (bare id or full platform URL) into canonical identifiers.
//!
//! All functions here are pure and total: anything that cannot be interpreted
//! yields `None`.
use url::Url;

/// Person slug from `<host>/in/<slug>/` or a bare slug.
pub fn extract_person_id(input: &str) -> Option<String> {
    extract_slug(input, "in")
}

/// Organization slug from `<host>/company/<slug>/` or a bare slug.
pub fn extract_company_id(input: &str) -> Option<String> {
    extract_slug(input, "company")
}

/// Numeric job id from `<host>/jobs/view/<digits>/`, a search URL carrying
/// `currentJobId`, or a bare numeric string.
pub fn extract_job_id(input: &str) -> Option<String> {
    let input = input.trim();
    if !is_url_like(input) {
        return is_numeric(input).then(|| input.to_string());
    }

    let url = parse_loose_url(input)?;
    let segments = path_segments(&url);
    if let [first, second, third, ..] = segments.as_slice() {
        if first == "jobs" && second == "view" {
            return job_id_from_segment(third);
        }
    }

    url.query_pairs()
        .find(|(key, _)| key == "currentJobId")
        .map(|(_, value)| value.into_owned())
        .filter(|value| is_numeric(value))
}

fn extract_slug(input: &str, section: &str) -> Option<String> {
    let input = input.trim();
    if !is_url_like(input) {
        return is_slug(input).then(|| input.to_string());
    }

    let url = parse_loose_url(input)?;
    match path_segments(&url).as_slice() {
        [first, slug, ..] if first == section && is_slug(slug) => Some(slug.clone()),
        _ => None,
    }
}

fn is_url_like(input: &str) -> bool {
    input.contains('/')
}

fn parse_loose_url(input: &str) -> Option<Url> {
    if input.contains("://") {
        Url::parse(input).ok()
    } else if input.starts_with('/') {
        // Relative hrefs as they appear in page markup.
        Url::parse("https://localhost").ok()?.join(input).ok()
    } else {
        Url::parse(&format!("https://{input}")).ok()
    }
}

fn path_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// Job view URLs sometimes carry a title slug: `software-engineer-at-acme-3812345678`.
fn job_id_from_segment(segment: &str) -> Option<String> {
    if is_numeric(segment) {
        return Some(segment.to_string());
    }
    segment
        .rsplit_once('-')
        .map(|(_, tail)| tail)
        .filter(|tail| is_numeric(tail))
        .map(str::to_string)
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '%'))
}
