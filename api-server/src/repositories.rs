//! Repository creation on behalf of the configured GitHub account.

use std::sync::Arc;

use repo_core::{ApplicationError, CreateRepoRequest, GithubClient, Transport};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Body of `POST /repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepoInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Summary returned after a repository was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoOutput {
    pub id: i64,
    pub name: String,
    pub owner: String,
}

#[derive(Clone)]
pub struct RepositoryService {
    client: GithubClient<Arc<dyn Transport>>,
    access_token: Arc<str>,
}

impl RepositoryService {
    pub fn new(client: GithubClient<Arc<dyn Transport>>, access_token: &str) -> Self {
        Self {
            client,
            access_token: Arc::from(access_token),
        }
    }

    #[instrument(skip_all, fields(repo = %input.name))]
    pub async fn create_repo(
        &self,
        input: CreateRepoInput,
    ) -> Result<CreateRepoOutput, ApplicationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ApplicationError::bad_request("Invalid repository name"));
        }
        let request = CreateRepoRequest {
            name: name.to_string(),
            description: input.description,
            private: false,
            ..Default::default()
        };

        let client = self.client.clone();
        let token = Arc::clone(&self.access_token);
        let created = tokio::task::spawn_blocking(move || client.create_repo(&token, &request))
            .await
            .map_err(|e| {
                error!(error = %e, "create repo task did not complete");
                ApplicationError::internal_server_error("repository creation was interrupted")
            })?
            .map_err(as_upstream_failure)?;

        info!(id = created.id, full_name = %created.full_name, "repository created");
        Ok(CreateRepoOutput {
            id: created.id,
            name: created.name,
            owner: created.owner.login,
        })
    }
}

// The client can report an error that still carries the remote 2xx status;
// answering our own caller with that status would read as success.
fn as_upstream_failure(err: ApplicationError) -> ApplicationError {
    if err.status < 400 {
        ApplicationError::with_status(502, err.message)
    } else {
        err
    }
}
