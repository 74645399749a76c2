use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_core::ErrorKind;
use scout_engine::{fetch_document, ClientConfig, ReqwestTransport, DEFAULT_USER_AGENT};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "AQEDtoken123";

fn setup(server: &MockServer) -> (ClientConfig, ReqwestTransport) {
    scout_logging::initialize_for_tests();
    let config = ClientConfig::with_base_url(server.uri());
    let transport = ReqwestTransport::new(&config).expect("transport builds");
    (config, transport)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn document_fetch_sends_browser_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/in/jane/"))
        .and(header("cookie", "li_at=AQEDtoken123"))
        .respond_with(html("<html><body><h1>Jane</h1></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    let url = format!("{}/in/jane/", server.uri());
    let document = fetch_document(&transport, &config, &url, TOKEN)
        .await
        .expect("fetch ok");
    assert_eq!(document.url, url);
    assert_eq!(document.html, "<html><body><h1>Jane</h1></body></html>");

    let requests = server.received_requests().await.expect("recording enabled");
    let headers = &requests[0].headers;
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(value("user-agent").as_deref(), Some(DEFAULT_USER_AGENT));
    assert_eq!(value("accept-language").as_deref(), Some("en-US,en;q=0.9"));
    assert_eq!(value("accept-encoding").as_deref(), Some("gzip, deflate, br"));
    assert_eq!(value("dnt").as_deref(), Some("1"));
    assert_eq!(value("sec-fetch-dest").as_deref(), Some("document"));
    assert_eq!(value("sec-fetch-mode").as_deref(), Some("navigate"));
    assert_eq!(value("sec-fetch-site").as_deref(), Some("none"));
    assert!(value("accept").is_some_and(|v| v.starts_with("text/html")));
}

#[tokio::test]
async fn redirect_to_login_is_not_authenticated_despite_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/in/jane/"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/uas/login?session_redirect=%2Fin%2Fjane%2F"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uas/login"))
        .respond_with(html("<html><body><h1>Sign in</h1></body></html>"))
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    let err = fetch_document(&transport, &config, &format!("{}/in/jane/", server.uri()), TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthenticated);
}

#[tokio::test]
async fn checkpoint_redirect_is_a_security_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/acme/about/"))
        .respond_with(
            ResponseTemplate::new(303).insert_header("location", "/checkpoint/challenge/abc"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checkpoint/challenge/abc"))
        .respond_with(html("<html><body>verify</body></html>"))
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    let url = format!("{}/company/acme/about/", server.uri());
    let err = fetch_document(&transport, &config, &url, TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SecurityChallenge);
}

#[tokio::test]
async fn non_200_status_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/view/1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/view/2/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    for (id, status) in [(1, 404), (2, 204)] {
        let url = format!("{}/jobs/view/{id}/", server.uri());
        let err = fetch_document(&transport, &config, &url, TOKEN)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::HttpError(status));
    }
}

#[tokio::test]
async fn undecodable_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/in/jane/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<html>ab\xffcd</html>".to_vec(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    let err = fetch_document(&transport, &config, &format!("{}/in/jane/", server.uri()), TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn legacy_charset_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/cafe/about/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><h1>Caf\xe9</h1></html>".to_vec(),
            "text/html; charset=ISO-8859-1",
        ))
        .mount(&server)
        .await;

    let (config, transport) = setup(&server);
    let url = format!("{}/company/cafe/about/", server.uri());
    let document = fetch_document(&transport, &config, &url, TOKEN)
        .await
        .expect("fetch ok");
    assert_eq!(document.html, "<html><h1>Café</h1></html>");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(html(&"x".repeat(4096)))
        .mount(&server)
        .await;

    let config = ClientConfig {
        max_bytes: 1024,
        ..ClientConfig::with_base_url(server.uri())
    };
    let transport = ReqwestTransport::new(&config).unwrap();
    let err = fetch_document(&transport, &config, &format!("{}/big", server.uri()), TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<html>late</html>").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = ClientConfig {
        request_timeout: Duration::from_millis(200),
        ..ClientConfig::with_base_url(server.uri())
    };
    let transport = ReqwestTransport::new(&config).unwrap();
    let err = fetch_document(&transport, &config, &format!("{}/slow", server.uri()), TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
}
