//! Project directories and their `config.json` files.

pub mod config;
pub mod manager;

pub use config::ProjectConfigManager;
pub use manager::ProjectManager;
