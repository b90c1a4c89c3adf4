//! pr-survey: strip survey file format, validation and compilation into a
//! costed route graph.

pub mod compile;
pub mod flanigan;
pub mod schema;
pub mod validate;

pub use compile::{CompiledSurvey, compile_survey};
pub use flanigan::flanigan_coefficients;
pub use schema::*;
pub use validate::{ValidationError, validate_survey};

use pr_core::PrError;
use pr_graph::GraphError;

pub type SurveyResult<T> = Result<T, SurveyError>;

#[derive(thiserror::Error, Debug)]
pub enum SurveyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Numeric error: {0}")]
    Core(#[from] PrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> SurveyResult<Survey> {
    let content = std::fs::read_to_string(path)?;
    let survey: Survey = serde_yaml::from_str(&content)?;
    validate_survey(&survey)?;
    Ok(survey)
}

pub fn save_yaml(path: &std::path::Path, survey: &Survey) -> SurveyResult<()> {
    validate_survey(survey)?;
    let content = serde_yaml::to_string(survey)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> SurveyResult<Survey> {
    let content = std::fs::read_to_string(path)?;
    let survey: Survey = serde_json::from_str(&content)?;
    validate_survey(&survey)?;
    Ok(survey)
}

pub fn save_json(path: &std::path::Path, survey: &Survey) -> SurveyResult<()> {
    validate_survey(survey)?;
    let content = serde_json::to_string_pretty(survey)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a survey, picking the format from the file extension (`.json`, else YAML).
pub fn load_survey(path: &std::path::Path) -> SurveyResult<Survey> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
