use cgx_wan_bfd::auth::{authenticate, CredentialPrompt, TokenSource, MAX_LOGIN_ATTEMPTS};
use cgx_wan_bfd::{ControllerClient, Error, Result};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Replays a fixed list of email/password pairs
struct Scripted {
    answers: Vec<(String, String)>,
    asked: usize,
}

impl Scripted {
    fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(e, p)| (e.to_string(), p.to_string()))
                .collect(),
            asked: 0,
        }
    }
}

impl CredentialPrompt for Scripted {
    fn credentials(&mut self) -> Result<(String, String)> {
        let answer = self
            .answers
            .get(self.asked)
            .cloned()
            .ok_or_else(|| Error::Prompt("out of answers".into()))?;
        self.asked += 1;
        Ok(answer)
    }
}

async fn profile_for(server: &MockServer, token: &str, tenant: &str) {
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .and(header("X-Auth-Token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant_id": tenant, "email": "ops@example.com"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_static_token_sets_tenant() {
    let server = MockServer::start().await;
    profile_for(&server, "abc123", "1001").await;

    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let source = TokenSource::Argument("abc123".into());
    let session = authenticate(&mut client, &source, &mut Scripted::new(&[]))
        .await
        .unwrap();

    assert_eq!(session.tenant_id, "1001");
    assert!(!session.interactive);
    assert_eq!(client.tenant_id(), Some("1001"));
}

#[tokio::test]
async fn test_rejected_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "_error": [{ "code": "UNAUTHORIZED", "message": "invalid token" }]
        })))
        .mount(&server)
        .await;

    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let source = TokenSource::Env {
        var: "X_AUTH_TOKEN",
        token: "stale".into(),
    };
    let err = authenticate(&mut client, &source, &mut Scripted::new(&[]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert!(client.tenant_id().is_none());
}

#[tokio::test]
async fn test_profile_without_tenant_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "x@example.com" })))
        .mount(&server)
        .await;

    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let source = TokenSource::Argument("abc123".into());
    let err = authenticate(&mut client, &source, &mut Scripted::new(&[]))
        .await
        .unwrap_err();
    assert!(err.is_authentication_error());
}

#[tokio::test]
async fn test_interactive_login_retries_after_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/api/login"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "wrong" })))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/api/login"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "right" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "x_auth_token": "session-token"
        })))
        .expect(1)
        .mount(&server)
        .await;
    profile_for(&server, "session-token", "2002").await;

    let mut prompt = Scripted::new(&[("ops@example.com", "wrong"), ("ops@example.com", "right")]);
    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let session = authenticate(&mut client, &TokenSource::Interactive, &mut prompt)
        .await
        .unwrap();

    assert!(session.interactive);
    assert_eq!(session.tenant_id, "2002");
    assert_eq!(prompt.asked, 2);
}

#[tokio::test]
async fn test_interactive_login_gives_up() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/api/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(u64::from(MAX_LOGIN_ATTEMPTS))
        .mount(&server)
        .await;

    let answers = vec![("a@example.com", "x"); MAX_LOGIN_ATTEMPTS as usize + 1];
    let mut prompt = Scripted::new(&answers);
    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let err = authenticate(&mut client, &TokenSource::Interactive, &mut prompt)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(prompt.asked, MAX_LOGIN_ATTEMPTS as usize);
}

#[tokio::test]
async fn test_token_file_source() {
    use std::io::Write;

    let server = MockServer::start().await;
    profile_for(&server, "from-file", "3003").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "from-file").unwrap();

    let mut client = ControllerClient::new(&server.uri()).unwrap();
    let source = TokenSource::resolve(None, Some(file.path()), |_| Some("env-token".into()));
    let session = authenticate(&mut client, &source, &mut Scripted::new(&[]))
        .await
        .unwrap();
    assert_eq!(session.tenant_id, "3003");
}

#[tokio::test]
async fn test_logout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ControllerClient::new(&server.uri()).unwrap();
    client.logout().await.unwrap();
}
