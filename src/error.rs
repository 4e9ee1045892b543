//! Error handling for the nodeflow crate.
//!
//! This module defines the crate-level error type and a Result alias.
//! Graph-scene operations have their own narrower error in
//! [`crate::graph::error`]; it converts into [`ComposerError`] at this
//! boundary.

use thiserror::Error;

use crate::graph::GraphError;

/// Main error type for nodeflow operations.
#[derive(Error, Debug)]
pub enum ComposerError {
    /// Errors from graph-scene operations.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Errors related to configuration loading/saving.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors.
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialize errors.
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic errors with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ComposerError>,
    },
}

impl ComposerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ComposerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for nodeflow operations.
pub type Result<T> = std::result::Result<T, ComposerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ComposerError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ComposerError::Config("missing [connect] table".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing [connect] table"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = ComposerError::Config("test".to_string());
        let with_ctx = err.with_context("Failed to load editor config");
        assert!(with_ctx.to_string().contains("Failed to load editor config"));
    }

    #[test]
    fn test_graph_error_converts() {
        use crate::graph::{GraphError, NodeId};

        let err: ComposerError = GraphError::UnknownNode(NodeId(3)).into();
        assert!(err.to_string().contains("NodeId(3)"));
    }
}
