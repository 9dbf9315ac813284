use std::path::PathBuf;
use thiserror::Error;

/// Error type shared by every manager in `lean-core`.
#[derive(Error, Debug)]
pub enum LeanError {
    /// No option is registered under the requested key.
    #[error("There is no option with key '{key}'. See {help} for the available options")]
    UnknownOption { key: String, help: String },

    /// A choice option was given a value outside of its allowed set.
    #[error("Invalid value '{value}' for option '{key}', expected one of: {}", .allowed.join(", "))]
    InvalidChoice {
        key: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("The value of option '{0}' cannot be empty")]
    EmptyValue(String),

    /// Sensitive options are never printed back.
    #[error("The value of '{0}' is sensitive and cannot be displayed")]
    SensitiveOption(String),

    #[error("Invalid docker image name '{0}'")]
    InvalidImage(String),

    #[error("Could not find a lean.json file in {0} or any of its parents")]
    CliRootNotFound(PathBuf),

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    /// A path component that is not portable across operating systems.
    #[error("{0} is not a valid path on every supported operating system")]
    InvalidPath(PathBuf),

    #[error("{0} is not a project directory")]
    NotAProject(PathBuf),

    #[error("{0} is not a library project (libraries live under the Library directory)")]
    NotALibrary(PathBuf),

    #[error("{0} cannot reference itself")]
    SelfReference(PathBuf),

    #[error("Cannot add a {library} library to a {project} project")]
    LanguageMismatch { project: String, library: String },

    #[error("Could not determine the language of project {0}")]
    UnknownLanguage(PathBuf),

    #[error("Malformed configuration file {path}: {reason}")]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("XML error in {path}: {reason}")]
    Xml { path: PathBuf, reason: String },

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure in the atomic persistence helpers.
    #[error("Persistence error: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

/// A specialized Result type for `lean-core` operations.
pub type Result<T> = std::result::Result<T, LeanError>;
