use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LoaderError {
    #[error("Loader config not found at {path}")]
    #[diagnostic(help("Pass the path of a TOML file describing the loader"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse loader config")]
    #[diagnostic(help("Check the TOML syntax in your loader config file"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid loader config: {reason}")]
    ConfigInvalid { reason: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to include template {path}")]
    #[diagnostic(help("The host includer rejected the located file"))]
    IncludeFailed { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, LoaderError>;
