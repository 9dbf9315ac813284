//! Fixed names shared by the managers and the CLI.

/// Base name (without tag) of the engine image.
pub const DEFAULT_ENGINE_IMAGE_BASE_NAME: &str = "quantconnect/lean";

/// Base name (without tag) of the research environment image.
pub const DEFAULT_RESEARCH_IMAGE_BASE_NAME: &str = "quantconnect/research";

/// Tag used when no image version is requested.
pub const DEFAULT_IMAGE_VERSION: &str = "latest";

pub const DEFAULT_ENGINE_IMAGE: &str = "quantconnect/lean:latest";
pub const DEFAULT_RESEARCH_IMAGE: &str = "quantconnect/research:latest";

/// Directory under the home directory holding the global storages.
pub const CONFIG_DIR_NAME: &str = ".lean";
pub const GENERAL_CONFIG_FILE_NAME: &str = "config";
pub const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Marker file identifying the CLI root directory.
pub const LEAN_CONFIG_FILE_NAME: &str = "lean.json";

/// Per-project configuration file.
pub const PROJECT_CONFIG_FILE_NAME: &str = "config.json";

/// Directory under the CLI root that holds library projects.
pub const LIBRARY_DIR_NAME: &str = "Library";

pub const CONFIG_SET_HELP_URL: &str =
    "https://www.lean.io/docs/v2/lean-cli/api-reference/lean-config-set#02-Description";

/// Market data directory at the CLI root; never contains projects.
pub const DATA_DIR_NAME: &str = "data";
