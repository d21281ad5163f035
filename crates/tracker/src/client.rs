//! GraphQL client for the tracking service.
//!
//! All requests go to `POST {base}/graphql` with HTTP basic auth
//! (`api:<key>`, the service's convention for API-key auth). The shared
//! [`reqwest::Client`] pools connections across requests.

use serde::de::DeserializeOwned;

use crate::error::TrackerError;
use crate::types::{
    GraphQlResponse, ProjectRef, ProjectsData, RunData, RunDetail, RunRef, RunsData, Viewer,
    ViewerData,
};

const VIEWER_QUERY: &str = "\
query Viewer {
    viewer { username }
}";

const PROJECTS_QUERY: &str = "\
query Projects {
    viewer {
        username
        projects(first: 500) {
            edges { node { id name } }
        }
    }
}";

const RUNS_QUERY: &str = "\
query Runs($entity: String, $project: String!) {
    project(entityName: $entity, name: $project) {
        runs(first: 500) {
            edges { node { id name } }
        }
    }
}";

const RUN_QUERY: &str = "\
query Run($entity: String, $project: String!, $run: String!) {
    project(entityName: $entity, name: $project) {
        run(name: $run) {
            id
            name
            createdAt
            state
            history(samples: 500)
        }
    }
}";

/// HTTP client for the tracking service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: reqwest::Client,
    api_url: String,
}

impl TrackerClient {
    /// Create a client for the given base URL, e.g. `https://api.wandb.ai`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Resolve the identity behind an API key.
    pub async fn viewer(&self, api_key: &str) -> Result<Viewer, TrackerError> {
        let data: ViewerData = self
            .graphql(api_key, VIEWER_QUERY, serde_json::json!({}))
            .await?;

        let username = data
            .viewer
            .and_then(|v| v.username)
            .ok_or(TrackerError::InvalidCredential)?;
        Ok(Viewer { username })
    }

    /// List the viewer's projects, in service order.
    pub async fn projects(&self, api_key: &str) -> Result<Vec<ProjectRef>, TrackerError> {
        let data: ProjectsData = self
            .graphql(api_key, PROJECTS_QUERY, serde_json::json!({}))
            .await?;

        let viewer = data.viewer.ok_or(TrackerError::InvalidCredential)?;
        Ok(viewer
            .projects
            .map(|conn| conn.into_nodes())
            .unwrap_or_default())
    }

    /// List a project's runs, in service order.
    ///
    /// `project_path` is either `entity/project` or a bare project name
    /// (the viewer's default entity is assumed).
    pub async fn runs(
        &self,
        api_key: &str,
        project_path: &str,
    ) -> Result<Vec<RunRef>, TrackerError> {
        let (entity, project) = split_project_path(project_path);
        let data: RunsData = self
            .graphql(
                api_key,
                RUNS_QUERY,
                serde_json::json!({ "entity": entity, "project": project }),
            )
            .await?;

        let project = data.project.ok_or_else(|| TrackerError::Api {
            status: 200,
            message: format!("project not found: {project_path}"),
        })?;
        Ok(project
            .runs
            .map(|conn| conn.into_nodes())
            .unwrap_or_default())
    }

    /// Fetch one run's descriptor and sampled history.
    pub async fn run(
        &self,
        api_key: &str,
        project_path: &str,
        run_id: &str,
    ) -> Result<RunDetail, TrackerError> {
        let (entity, project) = split_project_path(project_path);
        let data: RunData = self
            .graphql(
                api_key,
                RUN_QUERY,
                serde_json::json!({ "entity": entity, "project": project, "run": run_id }),
            )
            .await?;

        let run = data
            .project
            .and_then(|p| p.run)
            .ok_or_else(|| TrackerError::Api {
                status: 200,
                message: format!("run not found: {project_path}/{run_id}"),
            })?;
        run.into_detail()
    }

    /// Execute one GraphQL request and decode the `data` payload.
    ///
    /// HTTP 401/403 means the key was rejected; GraphQL-level errors are
    /// surfaced as [`TrackerError::Api`].
    async fn graphql<T: DeserializeOwned>(
        &self,
        api_key: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, TrackerError> {
        let response = self
            .client
            .post(format!("{}/graphql", self.api_url))
            .basic_auth("api", Some(api_key))
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TrackerError::InvalidCredential);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| TrackerError::Decode(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(%message, "tracking service returned GraphQL errors");
                return Err(TrackerError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
        }

        envelope
            .data
            .ok_or_else(|| TrackerError::Decode("response carried no data".to_string()))
    }
}

/// Split `entity/project` into its parts; a bare name has no entity.
fn split_project_path(path: &str) -> (Option<&str>, &str) {
    match path.split_once('/') {
        Some((entity, project)) if !entity.is_empty() => (Some(entity), project),
        Some((_, project)) => (None, project),
        None => (None, path),
    }
}
