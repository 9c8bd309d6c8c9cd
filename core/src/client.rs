//! GitHub client for the create-repository round trip.
//!
//! # Design
//! `GithubClient` owns an injected `Transport` and a base URL, nothing else.
//! `create_repo` is split the same way as the request/response halves it is
//! made of: `build_create_repo` produces an `HttpRequest`, the transport
//! executes it, and `parse_create_repo` turns the `HttpResponse` into either
//! a `CreateRepoResponse` or an `ApplicationError`.
//!
//! Response interpretation is a decision table over the status class and
//! whether the body decodes into the shape that class calls for:
//!
//! | status | body                      | result                                   |
//! |--------|---------------------------|------------------------------------------|
//! | any    | unreadable                | 500 "Invalid response body"              |
//! | non-2xx| decodes as `ErrorResponse`| remote message, remote status            |
//! | non-2xx| does not decode           | generic message, remote status           |
//! | 2xx    | does not decode           | generic message, the 2xx status, as error|
//! | 2xx    | decodes                   | `Ok(CreateRepoResponse)`                 |

use std::io::Read;

use tracing::{debug, error, instrument, warn};

use crate::error::ApplicationError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateRepoRequest, CreateRepoResponse, ErrorResponse};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const CREATE_REPO_PATH: &str = "/user/repos";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_AUTHORIZATION_FORMAT: &str = "token {}";
const HEADER_GITHUB_REQUEST_ID: &str = "x-github-request-id";
const CODE_INVALID_RESPONSE: &str = "invalid_response";

const MSG_INVALID_REQUEST_BODY: &str = "Invalid create repo request body";
const MSG_INVALID_RESTCLIENT_RESPONSE: &str = "invalid restclient response";
const MSG_INVALID_RESPONSE_BODY: &str = "Invalid response body";
const MSG_INVALID_ERROR_INTERFACE: &str = "invalid error interface when creating a new repo";
const MSG_UNDECODABLE_SUCCESS: &str =
    "Error trying to decode successfull create repo JSON response body";

/// Value of the `Authorization` header for `token`.
pub fn authorization_header(token: &str) -> String {
    HEADER_AUTHORIZATION_FORMAT.replace("{}", token)
}

/// Client for GitHub's repository API over an injected transport.
#[derive(Debug, Clone)]
pub struct GithubClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> GithubClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_API_URL)
    }

    /// Client against a different API root, e.g. a GitHub Enterprise host or
    /// a local fake.
    pub fn with_base_url(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn create_repo_url(&self) -> String {
        format!("{}{CREATE_REPO_PATH}", self.base_url)
    }

    /// Create a repository owned by the user that `token` belongs to.
    #[instrument(skip_all, fields(repo = %request.name))]
    pub fn create_repo(
        &self,
        token: &str,
        request: &CreateRepoRequest,
    ) -> Result<CreateRepoResponse, ApplicationError> {
        let http_request = self.build_create_repo(token, request)?;
        let response = self.transport.send(&http_request).map_err(|e| {
            error!(error = %e, "transport failed to deliver create repo request");
            ApplicationError::internal_server_error(MSG_INVALID_RESTCLIENT_RESPONSE)
        })?;
        self.parse_create_repo(response)
    }

    pub fn build_create_repo(
        &self,
        token: &str,
        request: &CreateRepoRequest,
    ) -> Result<HttpRequest, ApplicationError> {
        let body = serde_json::to_string(request).map_err(|e| {
            error!(error = %e, "failed to serialize create repo request");
            ApplicationError::internal_server_error(MSG_INVALID_REQUEST_BODY)
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.create_repo_url(),
            headers: vec![
                (HEADER_AUTHORIZATION.to_string(), authorization_header(token)),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn parse_create_repo(
        &self,
        mut response: HttpResponse,
    ) -> Result<CreateRepoResponse, ApplicationError> {
        let request_id = response
            .header(HEADER_GITHUB_REQUEST_ID)
            .unwrap_or("-")
            .to_string();
        let mut body = Vec::new();
        if let Err(e) = response.body.read_to_end(&mut body) {
            error!(status = response.status, %request_id, error = %e, "failed to read create repo response body");
            return Err(ApplicationError::internal_server_error(MSG_INVALID_RESPONSE_BODY));
        }
        interpret(response.status, &request_id, &body)
    }
}

enum Outcome {
    Created(CreateRepoResponse),
    UndecodableSuccess,
    Rejected(ErrorResponse),
    UndecodableRejection,
}

fn classify(status: u16, body: &[u8]) -> Outcome {
    if (200..300).contains(&status) {
        match serde_json::from_slice(body) {
            Ok(created) => Outcome::Created(created),
            Err(_) => Outcome::UndecodableSuccess,
        }
    } else {
        match serde_json::from_slice(body) {
            Ok(rejection) => Outcome::Rejected(rejection),
            Err(_) => Outcome::UndecodableRejection,
        }
    }
}

fn interpret(
    status: u16,
    request_id: &str,
    body: &[u8],
) -> Result<CreateRepoResponse, ApplicationError> {
    match classify(status, body) {
        Outcome::Created(created) => {
            debug!(status, full_name = %created.full_name, "repository created");
            Ok(created)
        }
        Outcome::UndecodableSuccess => {
            warn!(status, request_id, "successful create repo response did not match the expected shape");
            Err(ApplicationError::new(
                MSG_UNDECODABLE_SUCCESS,
                status,
                CODE_INVALID_RESPONSE,
            ))
        }
        Outcome::Rejected(rejection) => {
            warn!(status, request_id, message = %rejection.message, "create repo rejected by remote");
            Err(ApplicationError::with_status(status, rejection.message))
        }
        Outcome::UndecodableRejection => {
            warn!(status, request_id, "create repo error response did not match the expected shape");
            Err(ApplicationError::with_status(status, MSG_INVALID_ERROR_INTERFACE))
        }
    }
}
