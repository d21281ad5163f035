//! Handlers for the read-only reporting endpoints.
//!
//! Each endpoint is a pass-through to the tracking service using the
//! caller-supplied API key; the key itself is the authorization token.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use runlens_core::history::{extract_metrics, MetricSeries};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectsRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<(String, String)>,
}

/// POST /get_projects
pub async fn get_projects(
    State(state): State<AppState>,
    Json(input): Json<ProjectsRequest>,
) -> AppResult<Json<ProjectsResponse>> {
    let projects = state.tracker.projects(&input.api_key).await?;

    Ok(Json(ProjectsResponse {
        projects: projects.into_iter().map(|p| (p.id, p.name)).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RunsRequest {
    pub api_key: String,
    pub project_id: String,
}

#[derive(Debug, Serialize)]
pub struct RunsResponse {
    pub runs_list: Vec<(String, String)>,
}

/// POST /get_runs
pub async fn get_runs(
    State(state): State<AppState>,
    Json(input): Json<RunsRequest>,
) -> AppResult<Json<RunsResponse>> {
    let runs = state.tracker.runs(&input.api_key, &input.project_id).await?;

    Ok(Json(RunsResponse {
        runs_list: runs.into_iter().map(|r| (r.id, r.name)).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RunDataRequest {
    pub api_key: String,
    pub project_id: String,
    pub run_id: String,
}

#[derive(Debug, Serialize)]
pub struct RunDataResponse {
    pub run_data: RunDataBody,
}

#[derive(Debug, Serialize)]
pub struct RunDataBody {
    pub run_id: String,
    pub name: String,
    pub date: String,
    pub status: String,
    pub metrics: Vec<MetricSeries>,
}

/// POST /get_run_data
///
/// Fetches the run descriptor plus sampled history, then extracts the
/// per-metric series from the history table.
pub async fn get_run_data(
    State(state): State<AppState>,
    Json(input): Json<RunDataRequest>,
) -> AppResult<Json<RunDataResponse>> {
    let run = state
        .tracker
        .run(&input.api_key, &input.project_id, &input.run_id)
        .await?;

    let metrics = extract_metrics(&run.history);

    Ok(Json(RunDataResponse {
        run_data: RunDataBody {
            run_id: run.id,
            name: run.name,
            date: run.created_at,
            status: run.state,
            metrics,
        },
    }))
}
