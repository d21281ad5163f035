//! Public result types and GraphQL response shapes.

use runlens_core::history::HistoryRow;
use serde::Deserialize;

use crate::error::TrackerError;

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// The identity behind an API key.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub username: String,
}

/// One project visible to the viewer.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// One run inside a project.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRef {
    pub id: String,
    pub name: String,
}

/// A run descriptor with its decoded history rows.
#[derive(Debug, Clone)]
pub struct RunDetail {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub state: String,
    pub history: Vec<HistoryRow>,
}

// ---------------------------------------------------------------------------
// GraphQL wire shapes
// ---------------------------------------------------------------------------

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

/// Generic relay-style connection: `{ edges: [{ node: ... }] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: Option<T>,
}

impl<T> Connection<T> {
    /// Flatten the connection into its non-null nodes, order preserved.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().filter_map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerData {
    pub viewer: Option<ViewerNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerNode {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsData {
    pub viewer: Option<ProjectsViewer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsViewer {
    pub projects: Option<Connection<ProjectRef>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunsData {
    pub project: Option<RunsProject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunsProject {
    pub runs: Option<Connection<RunRef>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunData {
    pub project: Option<RunProject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunProject {
    pub run: Option<RunNode>,
}

/// The raw run node: history arrives as JSON-encoded row strings.
#[derive(Debug, Deserialize)]
pub(crate) struct RunNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub state: String,
    pub history: Option<Vec<String>>,
}

impl RunNode {
    /// Decode each history sample into a row map.
    pub fn into_detail(self) -> Result<RunDetail, TrackerError> {
        let history = self
            .history
            .unwrap_or_default()
            .iter()
            .map(|sample| {
                serde_json::from_str::<HistoryRow>(sample)
                    .map_err(|e| TrackerError::Decode(format!("history row: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RunDetail {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
            state: self.state,
            history,
        })
    }
}
