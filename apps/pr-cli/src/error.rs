//! Error type for the command line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load survey {path}: {source}")]
    Survey {
        path: PathBuf,
        source: pr_survey::SurveyError,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] pr_graph::GraphError),

    #[error("Solver error: {0}")]
    Solver(#[from] pr_solver::SolverError),

    #[error("Node {node} is out of range (survey has {count} nodes)")]
    NodeOutOfRange { node: u32, count: usize },

    #[error("Node {node} has no pressure table")]
    NoPressureTable { node: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
