use crate::constants::PROJECT_CONFIG_FILE_NAME;
use crate::error::{LeanError, Result};
use crate::fs::Storage;
use crate::model::{LeanLibraryReference, Language};
use std::path::Path;

/// Key of the library list inside a project's `config.json`.
pub const LIBRARIES_KEY: &str = "libraries";

/// Key of the project language inside a project's `config.json`.
pub const LANGUAGE_KEY: &str = "algorithm-language";

/// Gives access to the `config.json` of a project directory.
#[derive(Debug, Default, Clone)]
pub struct ProjectConfigManager;

impl ProjectConfigManager {
    pub fn new() -> Self {
        Self
    }

    /// The storage backed by `<project_dir>/config.json`.
    pub fn get_project_config(&self, project_dir: &Path) -> Storage {
        Storage::new(project_dir.join(PROJECT_CONFIG_FILE_NAME))
    }

    /// The language recorded in the project configuration, if any.
    ///
    /// Unrecognised values are treated as absent.
    pub fn language(&self, project_dir: &Path) -> Result<Option<Language>> {
        let config = self.get_project_config(project_dir);
        let value: Option<serde_json::Value> = config.get(LANGUAGE_KEY)?;
        Ok(value.and_then(|v| serde_json::from_value(v).ok()))
    }

    pub fn set_language(&self, project_dir: &Path, language: Language) -> Result<()> {
        self.get_project_config(project_dir)
            .set(LANGUAGE_KEY, &language)
    }

    /// The library references listed in the project configuration.
    pub fn libraries(&self, project_dir: &Path) -> Result<Vec<LeanLibraryReference>> {
        let config = self.get_project_config(project_dir);
        let libraries: Option<Vec<LeanLibraryReference>> =
            config.get(LIBRARIES_KEY).map_err(|e| match e {
                LeanError::Json(err) => LeanError::MalformedConfig {
                    path: config.path().to_path_buf(),
                    reason: format!("invalid '{}' list: {}", LIBRARIES_KEY, err),
                },
                other => other,
            })?;
        Ok(libraries.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libraries_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ProjectConfigManager::new();
        assert!(manager.libraries(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_libraries_list_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"libraries": "not a list"}"#,
        )
        .unwrap();

        let manager = ProjectConfigManager::new();
        assert!(matches!(
            manager.libraries(dir.path()),
            Err(LeanError::MalformedConfig { .. })
        ));
    }

    #[test]
    fn test_language_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ProjectConfigManager::new();
        assert_eq!(manager.language(dir.path()).unwrap(), None);

        manager.set_language(dir.path(), Language::CSharp).unwrap();
        assert_eq!(
            manager.language(dir.path()).unwrap(),
            Some(Language::CSharp)
        );

        let raw = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
        assert!(raw.contains(r#""algorithm-language": "CSharp""#));
    }
}
