use crate::constants::{DATA_DIR_NAME, PROJECT_CONFIG_FILE_NAME};
use crate::error::{LeanError, Result};
use crate::model::Language;
use crate::project::config::ProjectConfigManager;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recognises and enumerates project directories.
pub struct ProjectManager {
    config_manager: ProjectConfigManager,
}

impl ProjectManager {
    pub fn new(config_manager: ProjectConfigManager) -> Self {
        Self { config_manager }
    }

    pub fn config_manager(&self) -> &ProjectConfigManager {
        &self.config_manager
    }

    /// A project is a directory holding a `config.json`.
    pub fn is_project(&self, dir: &Path) -> bool {
        dir.is_dir() && dir.join(PROJECT_CONFIG_FILE_NAME).is_file()
    }

    /// Determines the language of the project in `dir`.
    ///
    /// The `algorithm-language` setting wins; otherwise the language is inferred
    /// from the files present (`main.py` or C# sources).
    pub fn project_language(&self, dir: &Path) -> Result<Language> {
        if let Some(language) = self.config_manager.language(dir)? {
            return Ok(language);
        }

        if dir.join("main.py").is_file() {
            return Ok(Language::Python);
        }

        let has_csharp_sources = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .any(|entry| {
                matches!(
                    entry.path().extension().and_then(|ext| ext.to_str()),
                    Some("cs") | Some("csproj")
                )
            });
        if has_csharp_sources {
            return Ok(Language::CSharp);
        }

        Err(LeanError::UnknownLanguage(dir.to_path_buf()))
    }

    /// `<dir>/<dir name>.csproj`, whether or not it exists.
    pub fn csproj_path(&self, dir: &Path) -> PathBuf {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        dir.join(format!("{}.csproj", name))
    }

    /// Lists every project under `root`, sorted.
    ///
    /// Hidden directories and the top-level data directory are skipped, and the
    /// walk does not descend into a project once found.
    pub fn list_projects(&self, root: &Path) -> Vec<PathBuf> {
        let mut projects = Vec::new();
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry));

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry while listing projects: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if self.is_project(entry.path()) {
                walker.skip_current_dir();
                projects.push(entry.into_path());
            }
        }

        projects.sort();
        debug!("Found {} projects under {}", projects.len(), root.display());
        projects
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && name == DATA_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn manager() -> ProjectManager {
        ProjectManager::new(ProjectConfigManager::new())
    }

    fn make_project(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("config.json"), "{}").unwrap();
    }

    #[test]
    fn test_is_project() {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("Project");
        make_project(&project);

        assert!(manager().is_project(&project));
        assert!(!manager().is_project(&project.join("config.json")));
        assert!(!manager().is_project(root.path()));
        assert!(!manager().is_project(&root.path().join("missing")));
    }

    #[test]
    fn test_language_inference() {
        let root = tempfile::tempdir().unwrap();
        let python = root.path().join("Py");
        let csharp = root.path().join("Cs");
        let empty = root.path().join("Empty");
        for dir in [&python, &csharp, &empty] {
            make_project(dir);
        }
        fs::write(python.join("main.py"), "").unwrap();
        fs::write(csharp.join("Main.cs"), "").unwrap();

        assert_eq!(manager().project_language(&python).unwrap(), Language::Python);
        assert_eq!(manager().project_language(&csharp).unwrap(), Language::CSharp);
        assert!(matches!(
            manager().project_language(&empty),
            Err(LeanError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_configured_language_wins_over_files() {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("Mixed");
        make_project(&project);
        fs::write(project.join("main.py"), "").unwrap();
        fs::write(
            project.join("config.json"),
            r#"{"algorithm-language": "CSharp"}"#,
        )
        .unwrap();

        assert_eq!(manager().project_language(&project).unwrap(), Language::CSharp);
    }

    #[test]
    fn test_csproj_path_uses_directory_name() {
        assert_eq!(
            manager().csproj_path(Path::new("/root/CSharp Project")),
            PathBuf::from("/root/CSharp Project/CSharp Project.csproj")
        );
    }

    #[test]
    fn test_list_projects_skips_hidden_data_and_nested() {
        let root = tempfile::tempdir().unwrap();
        make_project(&root.path().join("Alpha"));
        make_project(&root.path().join("Group/Beta"));
        make_project(&root.path().join("Alpha/Nested"));
        make_project(&root.path().join(".hidden/Gamma"));
        make_project(&root.path().join("data/Delta"));
        fs::create_dir_all(root.path().join("Empty")).unwrap();

        let projects = manager().list_projects(root.path());
        assert_eq!(
            projects,
            vec![root.path().join("Alpha"), root.path().join("Group/Beta")]
        );
    }
}
