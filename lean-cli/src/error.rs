use lean_core::LeanError;
use thiserror::Error;

/// Errors surfaced to the user by the `lean` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LeanError),

    #[error("The option '{0}' doesn't have a value set")]
    OptionNotSet(String),

    /// Interactive prompt failure (e.g. no terminal attached).
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Global logger configuration error.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A specialized Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
