//! Error types for the processing pipeline.

/// Error raised while building or running a processor.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// Merged sanitize schema does not deserialize.
    #[error("invalid sanitize schema")]
    Schema(#[from] serde_json::Error),

    /// A plugin reported a failure.
    #[error("plugin `{plugin}` failed: {message}")]
    Plugin {
        /// Plugin name.
        plugin: String,
        /// Failure description.
        message: String,
    },
}

impl PipelineError {
    /// Build a plugin failure.
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}
