//! Client core for creating repositories through GitHub's REST API.
//!
//! # Overview
//! `GithubClient::create_repo` builds a signed `POST /user/repos`, sends it
//! through an injected `Transport`, and interprets the response into either a
//! `CreateRepoResponse` or one normalized `ApplicationError`.
//!
//! # Design
//! - The transport is a constructor argument; there is no global client.
//! - `build_create_repo` and `parse_create_repo` are public so hosts that do
//!   their own I/O can still use the request/response contract.
//! - `ApplicationError` is also the error shape of the HTTP service crate.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{authorization_header, GithubClient};
pub use error::ApplicationError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{CreateRepoRequest, CreateRepoResponse, ErrorResponse, RepoOwner};
