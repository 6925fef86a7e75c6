//! Unified error types for the kn-template toolkit.
//!
//! Rendering and placeholder extraction never fail. These errors come from the
//! layers around them: configuration, template stores, and the registry.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during kn-template operations.
#[derive(Error, Debug)]
pub enum KnTemplateError {
    // --- Configuration ---

    /// The configuration file (`kn-template.config.json`) could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Stores ---

    /// The configured templates directory does not exist.
    #[error("templates directory not found: {0}")]
    TemplateDirNotFound(PathBuf),

    /// A store was asked for a template it does not hold.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    // --- Registry ---

    /// The registry has no template registered under this name.
    #[error("unknown template: {0} (not registered)")]
    UnknownTemplate(String),

    // --- Values ---

    /// The value document is not a JSON object of scalars.
    #[error("invalid values: {0}")]
    InvalidValues(String),

    /// A placeholder name does not match `[a-zA-Z0-9_.-]{1,64}`.
    #[error("invalid placeholder name: '{0}' (allowed: [a-zA-Z0-9_.-], 1-64 chars)")]
    InvalidName(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, KnTemplateError>`.
pub type Result<T> = std::result::Result<T, KnTemplateError>;
