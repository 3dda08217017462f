//! Error types for Sluice Pipes

use thiserror::Error;

/// Result type alias for building pipelines
pub type PipeResult<T> = std::result::Result<T, PipeError>;

/// Errors raised while turning steps into a pipeline
///
/// Running a built pipeline never fails: exhaustion is reported by
/// `advance` and filters skip elements they cannot read.
#[derive(Error, Debug)]
pub enum PipeError {
    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("Invalid argument for step {step}: {reason}")]
    InvalidStepArgument { step: String, reason: String },

    #[error("Step {step} cannot follow a {stage} stage")]
    StepMismatch { step: String, stage: &'static str },

    #[error(transparent)]
    Core(#[from] sluice_core::Error),
}
