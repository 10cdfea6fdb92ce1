//! Error types for the markdown components.

use crate::config::ConfigError;
use vmark_pipeline::PipelineError;

/// Error returned by the markdown components.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Building or running the processor failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Loading the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
