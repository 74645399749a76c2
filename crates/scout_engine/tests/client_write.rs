use pretty_assertions::assert_eq;
use scout_core::ErrorKind;
use scout_engine::{ClientConfig, ScoutClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const INVITEE: &str = "urn:li:profile:ACoAAB1234";

async fn authenticated_client(server: &MockServer) -> ScoutClient {
    scout_logging::initialize_for_tests();
    let client = ScoutClient::new(ClientConfig::with_base_url(server.uri())).expect("client builds");
    client.configure("AQEDtoken").await.expect("token accepted");
    client
}

fn invite_endpoint() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/voyager/api/voyagerRelationshipsDashMemberRelationships"))
        .and(query_param("action", "verifyQuotaAndCreateV2"))
}

#[tokio::test]
async fn invite_posts_the_exact_payload() {
    let server = MockServer::start().await;
    invite_endpoint()
        .and(header("cookie", "li_at=AQEDtoken"))
        .and(header("content-type", "application/json"))
        .and(header("x-restli-protocol-version", "2.0.0"))
        .and(header("x-li-lang", "en_US"))
        .and(header("accept", "application/vnd.linkedin.normalized+json+2.1"))
        .and(body_json(json!({
            "invitee": { "inviteeUnion": { "memberProfile": INVITEE } },
            "customMessage": "Great talk yesterday"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    client
        .send_invite(INVITEE, Some("  Great talk yesterday "))
        .await
        .expect("invite sent");
    assert!(client.status().await.last_probe_ok);
}

#[tokio::test]
async fn blank_note_is_omitted() {
    let server = MockServer::start().await;
    invite_endpoint()
        .and(body_json(json!({
            "invitee": { "inviteeUnion": { "memberProfile": "urn:li:miniProfile:xyz" } }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    client
        .send_invite("urn:li:miniProfile:xyz", Some("   "))
        .await
        .expect("invite sent");
}

#[tokio::test]
async fn invalid_urn_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    for urn in ["not-a-urn", "urn:li:company:123", "urn:li:profile:"] {
        let err = client.send_invite(urn, None).await.unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::InvalidUrn {
                value: urn.to_string()
            }
        );
        let err = client.send_message(urn, "hello").await.unwrap_err();
        assert_eq!(err.kind.tag(), "invalid_urn");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn overlong_note_and_empty_message_are_rejected_locally() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    let err = client
        .send_invite(INVITEE, Some(&"a".repeat(301)))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::InvalidParameter {
            name: "message".into()
        }
    );
    let err = client.send_message(INVITEE, " \n ").await.unwrap_err();
    assert_eq!(err.kind.tag(), "invalid_parameter");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn rate_limit_is_reported_as_such() {
    let server = MockServer::start().await;
    invite_endpoint()
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    let err = client.send_invite(INVITEE, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimited);
}

#[tokio::test]
async fn other_statuses_are_http_errors() {
    let server = MockServer::start().await;
    invite_endpoint()
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    let err = client.send_invite(INVITEE, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::HttpError(403));
}

#[tokio::test]
async fn message_posts_the_conversation_create_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voyager/api/messaging/conversations"))
        .and(query_param("action", "create"))
        .and(header("cookie", "li_at=AQEDtoken"))
        .and(body_json(json!({
            "keyVersion": "LEGACY_INBOX",
            "conversationCreate": {
                "eventCreate": {
                    "value": {
                        "com.linkedin.voyager.messaging.create.MessageCreate": {
                            "attributedBody": { "text": "Hello there" }
                        }
                    }
                },
                "recipients": [INVITEE],
                "subtype": "MEMBER_TO_MEMBER"
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    client
        .send_message(INVITEE, "Hello there")
        .await
        .expect("message sent");
}

#[tokio::test]
async fn writes_require_a_session() {
    scout_logging::initialize_for_tests();
    let server = MockServer::start().await;
    let client = ScoutClient::new(ClientConfig::with_base_url(server.uri())).unwrap();

    let err = client.send_message(INVITEE, "hi").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthenticated);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_redirect_on_write_is_not_authenticated() {
    let server = MockServer::start().await;
    invite_endpoint()
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/uas/login"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uas/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    let err = client.send_invite(INVITEE, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAuthenticated);
    assert!(!client.status().await.last_probe_ok);
}
