//! Data types shared by the managers and the CLI.
//!
//! # Submodules
//! - [`docker`]: Docker image names (`name:tag`).
//! - [`language`]: Project languages.
//! - [`library`]: Library references stored in project configuration and link outcomes.

pub mod docker;
pub mod language;
pub mod library;

pub use docker::{image_name, DockerImage};
pub use language::Language;
pub use library::{LeanLibraryReference, LinkOutcome};
