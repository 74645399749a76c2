//! Small selector and text helpers shared by the page parsers.
use scraper::{ElementRef, Html, Selector};

/// Parses a selector list; invalid CSS is skipped rather than panicking.
pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Collapses runs of whitespace and trims.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text with one line per non-empty text node, for long-form fields.
pub(crate) fn multiline_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(clean_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of the first element matching any of `selectors`, tried in order.
pub(crate) fn first_text(scope: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    first_match(scope, selectors, element_text)
}

pub(crate) fn first_multiline(scope: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    first_match(scope, selectors, multiline_text)
}

fn first_match(
    scope: ElementRef<'_>,
    selectors: &[&str],
    render: fn(ElementRef<'_>) -> String,
) -> Option<String> {
    selectors.iter().filter_map(|css| selector(css)).find_map(|sel| {
        scope
            .select(&sel)
            .map(render)
            .find(|text| !text.is_empty())
    })
}

pub(crate) fn first_element<'a>(scope: ElementRef<'a>, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| scope.select(&sel).next())
}

pub(crate) fn all_elements<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Visible text spans in order, skipping repeats of the previous span.
///
/// The member markup renders every label twice: once `aria-hidden` for sighted
/// users and once visually hidden for screen readers.
pub(crate) fn visible_spans(scope: ElementRef<'_>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for span in all_elements(scope, "span[aria-hidden=\"true\"]") {
        let text = element_text(span);
        if text.is_empty() || out.last() == Some(&text) {
            continue;
        }
        out.push(text);
    }
    out
}

pub(crate) fn meta_content(doc: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    doc.select(&sel)
        .filter_map(|meta| meta.value().attr("content"))
        .map(clean_text)
        .find(|content| !content.is_empty())
}

/// The page title (`og:title`, else `<title>`) cut at the first separator:
/// `Jane Doe - Engineer | LinkedIn` gives `Jane Doe`.
pub(crate) fn title_lead(doc: &Html) -> Option<String> {
    let title = meta_content(doc, "meta[property=\"og:title\"]").or_else(|| {
        let sel = selector("title")?;
        doc.select(&sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })?;
    let lead = [" | ", " - ", ": "]
        .iter()
        .fold(title.as_str(), |acc, sep| acc.split(sep).next().unwrap_or(acc))
        .trim()
        .to_string();
    (!lead.is_empty()).then_some(lead)
}

/// The section introduced by an anchor id (member markup) or tagged with a
/// `data-section`/class name (guest markup).
pub(crate) fn find_section<'a>(
    root: ElementRef<'a>,
    anchor_id: &str,
    guest_names: &[&str],
) -> Option<ElementRef<'a>> {
    let anchor = selector(&format!("#{anchor_id}"))?;
    all_elements(root, "section").into_iter().find(|section| {
        if section.select(&anchor).next().is_some() {
            return true;
        }
        let data_section = section.value().attr("data-section").unwrap_or_default();
        guest_names.iter().any(|name| {
            data_section == *name || section.value().classes().any(|class| class == *name)
        })
    })
}

/// Parses counts as rendered on the platform: `500+`, `1,234`, `12K`, `1.2M`.
pub(crate) fn parse_count_token(token: &str) -> Option<u64> {
    let token = token.trim().trim_end_matches('+').replace(',', "");
    let (digits, multiplier) = match token.chars().last()? {
        'k' | 'K' => (&token[..token.len() - 1], 1_000f64),
        'm' | 'M' => (&token[..token.len() - 1], 1_000_000f64),
        _ => (token.as_str(), 1f64),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value: f64 = digits.parse().ok()?;
    Some((value * multiplier).round() as u64)
}

/// Finds `<number> <noun>` in `text`, e.g. `500+ connections`.
pub(crate) fn count_before(text: &str, noun: &str) -> Option<u64> {
    let lower = text.to_lowercase();
    let mut from = 0;
    while let Some(offset) = lower[from..].find(noun) {
        let at = from + offset;
        if let Some(count) = lower[..at]
            .split_whitespace()
            .last()
            .and_then(parse_count_token)
        {
            return Some(count);
        }
        from = at + noun.len();
    }
    None
}

/// First element in `scope` whose text carries a `<number> <noun>` count.
pub(crate) fn find_count(scope: ElementRef<'_>, noun: &str) -> Option<u64> {
    all_elements(scope, "span, li, a, p, div, h3, dd")
        .into_iter()
        .find_map(|element| count_before(&element_text(element), noun))
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Splits `A, B and C` style lists.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([',', '•', '·']).flat_map(|p| p.split(" and ")) {
        let item = clean_text(part);
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
