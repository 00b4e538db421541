//! Error types for the E2E suite

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("node not found on PATH; Playwright scripts are run with `node`")]
    NodeNotFound,

    #[error("browser script failed at step `{step}`: {message}")]
    Script { step: String, message: String },

    #[error("browser script produced no verdict: {0}")]
    NoVerdict(String),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("screenshot `{name}` differs by {diff_percent:.2}% (threshold: {threshold:.2}%)")]
    ScreenshotMismatch {
        name: String,
        diff_percent: f64,
        threshold: f64,
    },

    #[error("baseline not found: {0}")]
    BaselineNotFound(String),

    #[error("visual comparison: {0}")]
    Visual(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type E2eResult<T> = Result<T, E2eError>;
