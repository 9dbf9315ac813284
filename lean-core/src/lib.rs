//! # Lean Core Library
//!
//! Configuration bookkeeping for the `lean` command-line tool.
//!
//! ## Modules
//! - `config`: The option registry (credentials, default language, image overrides).
//! - `fs`: Key/value storages, atomic persistence and path utilities.
//! - `model`: Docker images, project languages and library references.
//! - `project`: Per-project `config.json` access and project discovery.
//! - `library`: Linking library projects into consumer projects.
//! - `xml`: `.csproj` project-reference rewriting.

pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod library;
pub mod model;
pub mod project;
#[cfg(feature = "test-utils")]
pub mod testing;
pub mod xml;

pub use config::{ConfigOption, OptionKind, OptionRegistry};
pub use error::{LeanError, Result};
pub use fs::{PathManager, Storage};
pub use library::LibraryManager;
pub use model::{DockerImage, Language, LeanLibraryReference, LinkOutcome};
pub use project::{ProjectConfigManager, ProjectManager};
