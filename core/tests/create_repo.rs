//! Create-repo scenarios driven through a fake transport.
//!
//! Each test installs its own transport instance, so scenarios never share
//! state and can run in parallel.

use std::io::{self, Read};

use repo_core::{
    ApplicationError, CreateRepoRequest, CreateRepoResponse, GithubClient, HttpRequest,
    HttpResponse, Transport, TransportError,
};

/// Transport that answers every request by calling `respond`.
struct FakeTransport<F> {
    respond: F,
}

impl<F> Transport for FakeTransport<F>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (self.respond)(request)
    }
}

fn client_replying<F>(respond: F) -> GithubClient<FakeTransport<F>>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    GithubClient::new(FakeTransport { respond })
}

fn create_with(
    status: u16,
    body: &'static str,
    token: &str,
) -> Result<CreateRepoResponse, ApplicationError> {
    client_replying(move |_| Ok(HttpResponse::new(status, body)))
        .create_repo(token, &CreateRepoRequest::default())
}

struct ClosedStream;

impl Read for ClosedStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream already closed"))
    }
}

#[test]
fn invalid_token_message_is_passed_through() {
    let err = create_with(400, r#"{"message":"Invalid token"}"#, "invalidToken").unwrap_err();
    assert_eq!(err.message, "Invalid token");
    assert_eq!(err.status, 400);
    assert_eq!(err.code, "bad_request");
}

#[test]
fn remote_not_found_is_passed_through() {
    let err = create_with(400, r#"{"message":"Not Found"}"#, "validToken").unwrap_err();
    assert_eq!(err.message, "Not Found");
}

#[test]
fn unreadable_body_is_invalid_response_body_for_any_status() {
    for status in [0, 200, 201, 400, 404, 500] {
        let client = client_replying(move |_| Ok(HttpResponse::from_reader(status, ClosedStream)));
        let err = client
            .create_repo("validToken", &CreateRepoRequest::default())
            .unwrap_err();
        assert_eq!(err.message, "Invalid response body", "status {status}");
        assert_eq!(err.status, 500, "status {status}");
    }
}

#[test]
fn undecodable_error_body_keeps_remote_status() {
    let err = create_with(400, "{}garbage", "validToken").unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "invalid error interface when creating a new repo");
}

#[test]
fn valid_success_body_decodes() {
    let created = create_with(
        200,
        r#"{"name":"Test Name","full_name":"test full name","owner":{"login": "octocat"}}"#,
        "validToken",
    )
    .unwrap();
    assert_eq!(created.name, "Test Name");
    assert_eq!(created.full_name, "test full name");
    assert_eq!(created.owner.login, "octocat");
}

#[test]
fn mismatched_success_body_is_error_with_success_status() {
    let err = create_with(200, r#"{"id":"sophie"}"#, "validToken").unwrap_err();
    assert_eq!(err.status, 200);
    assert_eq!(err.code, "invalid_response");
    assert_eq!(
        err.message,
        "Error trying to decode successfull create repo JSON response body"
    );
}

#[test]
fn transport_failure_is_internal_error() {
    let client = client_replying(|_| {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        Err(TransportError::Request(ureq::Error::Io(refused)))
    });
    let err = client
        .create_repo("validToken", &CreateRepoRequest::default())
        .unwrap_err();
    assert_eq!(
        err,
        ApplicationError::new("invalid restclient response", 500, "internal_server_error")
    );
}

#[test]
fn token_is_sent_in_authorization_header() {
    let client = client_replying(|req| {
        let status = if req.header("Authorization") == Some("token s3cret") {
            201
        } else {
            401
        };
        Ok(HttpResponse::new(status, r#"{"message":"Bad credentials"}"#))
    });
    let request = CreateRepoRequest {
        name: "demo".to_string(),
        ..Default::default()
    };
    assert!(client.create_repo("s3cret", &request).is_ok());
    let err = client.create_repo("wrong", &request).unwrap_err();
    assert_eq!(err.message, "Bad credentials");
    assert_eq!(err.status, 401);
}

#[test]
fn identical_responses_yield_identical_results() {
    let cases = [
        (201, r#"{"id":9,"name":"a","full_name":"o/a","owner":{"login":"o"}}"#),
        (422, r#"{"message":"Repository creation failed."}"#),
        (502, "<html>bad gateway</html>"),
        (200, r#"{"owner":{"login":42}}"#),
    ];
    for (status, body) in cases {
        let first = create_with(status, body, "t");
        let second = create_with(status, body, "t");
        assert_eq!(first, second, "status {status}");
    }
}

#[test]
fn failure_codes_never_claim_success() {
    for (status, body) in [(200, "null"), (201, "[]"), (302, r#"{"message":"Moved"}"#)] {
        let err = create_with(status, body, "t").unwrap_err();
        assert_eq!(err.status, status);
        assert_ne!(err.code, "ok", "status {status}");
        assert_ne!(err.code, "internal_server_error", "status {status}");
    }
}
