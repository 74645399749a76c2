use pretty_assertions::assert_eq;
use scout_core::{ErrorKind, JobListing};
use scout_engine::{job_view_url, parse_job_details, parse_job_search};

const SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/?keywords=rust";

fn guest_card(id: u32, title: &str, easy_apply: bool) -> String {
    let easy = if easy_apply {
        r#"<span class="job-posting-benefits__text">Easy Apply</span>"#
    } else {
        ""
    };
    format!(
        r#"<li><div class="base-card job-search-card" data-entity-urn="urn:li:jobPosting:{id}">
          <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/rust-engineer-at-acme-{id}?refId=x"></a>
          <div class="base-search-card__info">
            <h3 class="base-search-card__title">{title}</h3>
            <h4 class="base-search-card__subtitle"><a href="/company/acme">Acme</a></h4>
            <div class="base-search-card__metadata">
              <span class="job-search-card__location">Remote</span>
              <span class="job-search-card__salary-info">$150K - $180K</span>
              <time class="job-search-card__listdate" datetime="2024-05-01">2 days ago</time>
              {easy}
            </div>
          </div>
        </div></li>"#
    )
}

fn results_page(cards: &[String]) -> String {
    format!(
        r#"<html><body><ul class="jobs-search__results-list">{}</ul></body></html>"#,
        cards.concat()
    )
}

#[test]
fn guest_cards_in_document_order() {
    scout_logging::initialize_for_tests();
    let html = results_page(&[
        guest_card(101, "Rust Engineer", true),
        guest_card(102, "Systems Engineer", false),
    ]);
    let listings = parse_job_search(&html, SEARCH_URL).unwrap();
    assert_eq!(
        listings[0],
        JobListing {
            id: "101".into(),
            title: "Rust Engineer".into(),
            company: "Acme".into(),
            location: Some("Remote".into()),
            posted_date: Some("2024-05-01".into()),
            salary: Some("$150K - $180K".into()),
            is_easy_apply: true,
            job_url: "https://www.linkedin.com/jobs/view/101/".into(),
        }
    );
    assert_eq!(listings[1].id, "102");
    assert!(!listings[1].is_easy_apply);
    assert_eq!(listings.len(), 2);
}

#[test]
fn duplicate_and_untitled_cards_are_dropped() {
    let html = results_page(&[
        guest_card(201, "First", false),
        guest_card(202, "", false),
        guest_card(201, "First again", false),
        guest_card(203, "Third", false),
    ]);
    let ids: Vec<String> = parse_job_search(&html, SEARCH_URL)
        .unwrap()
        .into_iter()
        .map(|listing| listing.id)
        .collect();
    assert_eq!(ids, vec!["201", "203"]);
}

#[test]
fn member_cards_with_nested_ids_are_deduplicated() {
    let html = r#"<html><body><ul>
      <li data-occludable-job-id="777">
        <div class="job-card-container" data-job-id="777">
          <a class="job-card-container__link job-card-list__title" href="/jobs/view/777/"><strong>Backend Engineer</strong></a>
          <div class="artdeco-entity-lockup__subtitle"><span>Globex</span></div>
          <ul class="job-card-container__metadata-wrapper">
            <li class="job-card-container__metadata-item">Berlin (Hybrid)</li>
          </ul>
          <div class="job-card-container__apply-method">Easy Apply</div>
        </div>
      </li>
      <li data-occludable-job-id="778"></li>
    </ul></body></html>"#;
    let listings = parse_job_search(html, SEARCH_URL).unwrap();
    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.id, "777");
    assert_eq!(listing.title, "Backend Engineer");
    assert_eq!(listing.company, "Globex");
    assert_eq!(listing.location.as_deref(), Some("Berlin (Hybrid)"));
    assert!(listing.is_easy_apply);
}

#[test]
fn bare_job_links_are_a_last_resort() {
    let html = r#"<html><body><div>
        <a href="/jobs/view/platform-engineer-at-initech-9001/">Platform Engineer</a>
        <a href="/jobs/view/9001/">Platform Engineer</a>
        <a href="/jobs/view/9002/">SRE</a>
    </div></body></html>"#;
    let listings = parse_job_search(html, SEARCH_URL).unwrap();
    let titles: Vec<(&str, &str)> = listings
        .iter()
        .map(|l| (l.id.as_str(), l.title.as_str()))
        .collect();
    assert_eq!(titles, vec![("9001", "Platform Engineer"), ("9002", "SRE")]);
}

#[test]
fn page_without_cards_is_empty_not_an_error() {
    let html = "<html><body><p>No matching jobs found.</p></body></html>";
    assert!(parse_job_search(html, SEARCH_URL).unwrap().is_empty());
    assert_eq!(
        parse_job_search("", SEARCH_URL).unwrap_err().kind,
        ErrorKind::ParseError
    );
}

#[test]
fn guest_job_details() {
    let html = r#"<html><body><main>
    <section class="top-card-layout">
      <h1 class="top-card-layout__title topcard__title">Senior Rust Engineer</h1>
      <h4 class="top-card-layout__second-subline">
        <span class="topcard__flavor"><a class="topcard__org-name-link" href="/company/acme">Acme</a></span>
        <span class="topcard__flavor topcard__flavor--bullet">Seattle, WA</span>
        <span class="posted-time-ago__text">1 week ago</span>
        <figcaption class="num-applicants__caption">Over 200 applicants</figcaption>
      </h4>
    </section>
    <div class="salary compensation__salary">$180,000.00/yr - $220,000.00/yr</div>
    <div class="description__text"><div class="show-more-less-html__markup">
      <p>Build storage engines.</p><p>Skills: Rust, Tokio and SQL</p>
    </div></div>
    <ul class="description__job-criteria-list">
      <li class="description__job-criteria-item">
        <h3 class="description__job-criteria-subheader">Seniority level</h3>
        <span class="description__job-criteria-text">Mid-Senior level</span>
      </li>
      <li class="description__job-criteria-item">
        <h3 class="description__job-criteria-subheader">Employment type</h3>
        <span class="description__job-criteria-text">Full-time</span>
      </li>
    </ul>
    </main></body></html>"#;
    let page = "https://www.linkedin.com/jobs/view/3812345678/";
    let outcome = parse_job_details(html, "3812345678", page).unwrap();
    assert!(outcome.is_sufficient());
    let job = outcome.into_inner();

    assert_eq!(job.id, "3812345678");
    assert_eq!(job.job_url, page);
    assert_eq!(job.title, "Senior Rust Engineer");
    assert_eq!(job.company, "Acme");
    assert_eq!(job.location.as_deref(), Some("Seattle, WA"));
    assert_eq!(job.posted_date.as_deref(), Some("1 week ago"));
    assert_eq!(job.applicant_count.as_deref(), Some("Over 200 applicants"));
    assert_eq!(
        job.description.as_deref(),
        Some("Build storage engines.\nSkills: Rust, Tokio and SQL")
    );
    assert_eq!(job.salary.as_deref(), Some("$180,000.00/yr - $220,000.00/yr"));
    assert_eq!(job.experience_level.as_deref(), Some("Mid-Senior level"));
    assert_eq!(job.employment_type.as_deref(), Some("Full-time"));
    assert_eq!(job.workplace_type, None);
    assert!(!job.is_easy_apply);
    assert_eq!(job.skills, vec!["Rust", "Tokio", "SQL"]);
}

#[test]
fn member_job_details_read_insight_pills() {
    let html = r#"<html><body>
    <div class="job-details-jobs-unified-top-card">
      <div class="job-details-jobs-unified-top-card__job-title"><h1 class="t-24">Platform Engineer</h1></div>
      <div class="job-details-jobs-unified-top-card__company-name"><a href="/company/globex/">Globex</a></div>
      <div class="job-details-jobs-unified-top-card__primary-description-container">
        <span class="tvm__text">Berlin, Germany</span>
      </div>
      <div class="job-details-preferences-and-skills__pill">Remote</div>
      <div class="job-details-preferences-and-skills__pill">Full-time</div>
      <div class="job-details-jobs-unified-top-card__job-insight">€90K/yr - €110K/yr</div>
      <button class="jobs-apply-button">Easy Apply</button>
    </div>
    <div class="jobs-description__content"><p>Run the fleet.</p></div>
    <div class="job-details-how-you-match__skills-item-subtitle">Kubernetes, Terraform and Go</div>
    </body></html>"#;
    let job = parse_job_details(html, "555", "https://www.linkedin.com/jobs/view/555/")
        .unwrap()
        .into_inner();

    assert_eq!(job.title, "Platform Engineer");
    assert_eq!(job.company, "Globex");
    assert_eq!(job.location.as_deref(), Some("Berlin, Germany"));
    assert_eq!(job.workplace_type.as_deref(), Some("Remote"));
    assert_eq!(job.employment_type.as_deref(), Some("Full-time"));
    assert_eq!(job.salary.as_deref(), Some("€90K/yr - €110K/yr"));
    assert_eq!(job.description.as_deref(), Some("Run the fleet."));
    assert!(job.is_easy_apply);
    assert_eq!(job.skills, vec!["Kubernetes", "Terraform", "Go"]);
}

#[test]
fn job_view_urls_follow_the_page_host() {
    assert_eq!(
        job_view_url("http://127.0.0.1:4000/jobs/search/?keywords=x", "42"),
        "http://127.0.0.1:4000/jobs/view/42/"
    );
}
