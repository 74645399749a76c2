use pretty_assertions::assert_eq;
use scout_core::CompanyProfile;
use scout_engine::parse_company;

const ABOUT_PAGE: &str = r#"
<html><head><title>Acme Corp: About | LinkedIn</title></head><body><main>
<section class="org-top-card artdeco-card">
  <h1 class="org-top-card-summary__title">Acme Corp</h1>
  <p class="org-top-card-summary__tagline">Making everything</p>
  <div class="org-top-card-summary-info-list">
    <div class="org-top-card-summary-info-list__info-item">Software Development</div>
    <div class="org-top-card-summary-info-list__info-item">Seattle, WA</div>
    <div class="org-top-card-summary-info-list__info-item">12K followers</div>
  </div>
</section>
<section class="artdeco-card org-page-details-module__card-spacing">
  <p class="break-words">Acme builds tools for builders.</p>
  <dl>
    <dt>Website</dt><dd><a href="https://acme.example">https://acme.example</a></dd>
    <dt>Industry</dt><dd>Software Development</dd>
    <dt>Company size</dt><dd>1,001-5,000 employees</dd><dd>4,812 associated members</dd>
    <dt>Headquarters</dt><dd>Seattle, WA</dd>
    <dt>Founded</dt><dd>1999</dd>
    <dt>Specialties</dt><dd>Rockets, Anvils, and Portable Holes</dd>
  </dl>
</section>
</main></body></html>
"#;

#[test]
fn about_page_details() {
    scout_logging::initialize_for_tests();
    let outcome = parse_company(ABOUT_PAGE, "acme").unwrap();
    assert!(outcome.is_sufficient());
    assert_eq!(
        outcome.into_inner(),
        CompanyProfile {
            name: "Acme Corp".into(),
            slug: "acme".into(),
            tagline: Some("Making everything".into()),
            about: Some("Acme builds tools for builders.".into()),
            website: Some("https://acme.example".into()),
            industry: Some("Software Development".into()),
            company_size: Some("1,001-5,000 employees".into()),
            headquarters: Some("Seattle, WA".into()),
            founded: Some("1999".into()),
            specialties: vec!["Rockets".into(), "Anvils".into(), "Portable Holes".into()],
            employee_count: Some(4812),
            follower_count: Some(12_000),
        }
    );
}

#[test]
fn top_card_fills_gaps_without_details_list() {
    let html = r#"<html><body>
        <section class="org-top-card">
          <h1 class="org-top-card-summary__title">Globex</h1>
          <div class="org-top-card-summary-info-list__info-item">Software Development</div>
          <div class="org-top-card-summary-info-list__info-item">Springfield, OR</div>
          <div class="org-top-card-summary-info-list__info-item">850 followers</div>
          <a href="/search/results/people/?currentCompany=42"><span>View all 5,001 employees</span></a>
        </section></body></html>"#;
    let company = parse_company(html, "globex").unwrap().into_inner();
    assert_eq!(company.name, "Globex");
    assert_eq!(company.industry.as_deref(), Some("Software Development"));
    assert_eq!(company.headquarters.as_deref(), Some("Springfield, OR"));
    assert_eq!(company.employee_count, Some(5001));
    assert_eq!(company.follower_count, Some(850));
    assert_eq!(company.website, None);
    assert!(company.specialties.is_empty());
}

#[test]
fn gated_company_page_is_insufficient() {
    let html = r#"<html><head><title>LinkedIn</title></head>
        <body><h1>Sign in</h1><p>Join to see who you already know.</p></body></html>"#;
    let outcome = parse_company(html, "acme").unwrap();
    assert!(!outcome.is_sufficient());
    assert_eq!(outcome.into_inner().slug, "acme");
}
