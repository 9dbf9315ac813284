//! Linking library projects into consumer projects.
//!
//! A library is a project living under `<cli root>/Library/`. Linking records the
//! library's root-relative path in the consumer's `config.json`; C# consumers
//! additionally get a `<ProjectReference>` to the library's `.csproj`.

use crate::constants::LIBRARY_DIR_NAME;
use crate::error::{LeanError, Result};
use crate::fs::{is_path_valid, relative_path};
use crate::model::library::to_forward_slashes;
use crate::model::{Language, LeanLibraryReference, LinkOutcome};
use crate::project::config::LIBRARIES_KEY;
use crate::project::ProjectManager;
use crate::xml::XmlManager;
use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};

pub struct LibraryManager {
    cli_root: PathBuf,
    project_manager: ProjectManager,
    xml_manager: XmlManager,
}

impl LibraryManager {
    /// Creates a LibraryManager for the CLI root at `cli_root`.
    ///
    /// # Arguments
    ///
    /// * `cli_root` - Directory holding `lean.json`; library paths are stored relative to it.
    /// * `project_manager` - Used to recognise projects and their languages.
    /// * `xml_manager` - Used to rewrite C# project files.
    pub fn new(
        cli_root: impl Into<PathBuf>,
        project_manager: ProjectManager,
        xml_manager: XmlManager,
    ) -> Self {
        Self {
            cli_root: cli_root.into(),
            project_manager,
            xml_manager,
        }
    }

    pub fn cli_root(&self) -> &Path {
        &self.cli_root
    }

    pub fn project_manager(&self) -> &ProjectManager {
        &self.project_manager
    }

    /// Whether `path` is a library: a project directory somewhere under `<cli root>/Library/`.
    pub fn is_lean_library(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.cli_root) else {
            return false;
        };
        let mut components = relative.components();
        let under_library_dir = matches!(
            components.next(),
            Some(Component::Normal(first)) if first.to_str() == Some(LIBRARY_DIR_NAME)
        ) && components.next().is_some();

        under_library_dir && self.project_manager.is_project(path)
    }

    /// Lists every library under the CLI root.
    pub fn list_libraries(&self) -> Vec<PathBuf> {
        self.project_manager
            .list_projects(&self.cli_root.join(LIBRARY_DIR_NAME))
            .into_iter()
            .filter(|dir| self.is_lean_library(dir))
            .collect()
    }

    /// The path stored in a consumer's `config.json` for `library_dir`.
    ///
    /// Relative to the CLI root, written with `/` separators.
    pub fn library_path_for_project_config(&self, library_dir: &Path) -> PathBuf {
        PathBuf::from(to_forward_slashes(&relative_path(
            library_dir,
            &self.cli_root,
        )))
    }

    /// The `Include` path of a C# consumer's reference to the library's `.csproj`.
    ///
    /// One `..` per component of the project's root-relative path leads back to the
    /// CLI root, so a project nested `depth` directories below the root gets
    /// `depth + 1` steps, followed by the library's root-relative location. Projects
    /// under `Library/` climb all the way to the root as well.
    pub fn csharp_library_csproj_path(&self, project_dir: &Path, library_dir: &Path) -> PathBuf {
        let depth = relative_path(project_dir, &self.cli_root)
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .count();
        let mut include: PathBuf = (0..depth).map(|_| Component::ParentDir).collect();
        include.push(self.library_path_for_project_config(library_dir));
        if let Some(file_name) = self.project_manager.csproj_path(library_dir).file_name() {
            include.push(file_name);
        }
        include
    }

    /// The library references of the project at `project_dir`.
    pub fn library_references(&self, project_dir: &Path) -> Result<Vec<LeanLibraryReference>> {
        self.project_manager
            .config_manager()
            .libraries(project_dir)
    }

    /// Adds a reference to `library_dir` to the project at `project_dir`.
    ///
    /// # Returns
    ///
    /// * `Ok(LinkOutcome::Added)` after persisting the new reference.
    /// * `Ok(LinkOutcome::AlreadyPresent)` if the project already references the library.
    /// * `Ok(LinkOutcome::Added)` also when the configuration already had the entry but a
    ///   C# project file lacked its `ProjectReference`, which is restored.
    /// * `Err` if either directory is invalid or the languages differ.
    pub fn add_library_reference(
        &self,
        project_dir: &Path,
        library_dir: &Path,
    ) -> Result<LinkOutcome> {
        for dir in [project_dir, library_dir] {
            if !is_path_valid(&relative_path(dir, &self.cli_root)) {
                return Err(LeanError::InvalidPath(dir.to_path_buf()));
            }
        }
        if !self.project_manager.is_project(project_dir) {
            return Err(LeanError::NotAProject(project_dir.to_path_buf()));
        }
        if !self.is_lean_library(library_dir) {
            return Err(LeanError::NotALibrary(library_dir.to_path_buf()));
        }
        if project_dir == library_dir {
            return Err(LeanError::SelfReference(project_dir.to_path_buf()));
        }

        let project_language = self.project_manager.project_language(project_dir)?;
        let library_language = self.project_manager.project_language(library_dir)?;
        if project_language != library_language {
            return Err(LeanError::LanguageMismatch {
                project: project_language.to_string(),
                library: library_language.to_string(),
            });
        }

        let reference_path = self.library_path_for_project_config(library_dir);
        let mut libraries = self.library_references(project_dir)?;
        let already_referenced = libraries.iter().any(|l| l.points_to(&reference_path));

        // The project file goes first: if its rewrite fails, config.json is untouched
        // and a retry starts from scratch.
        let csproj_updated = if project_language == Language::CSharp {
            self.add_csproj_reference(project_dir, library_dir)?
        } else {
            false
        };

        if already_referenced {
            if csproj_updated {
                info!(
                    "Restored the missing ProjectReference to {} in {}",
                    reference_path.display(),
                    project_dir.display()
                );
                return Ok(LinkOutcome::Added);
            }
            info!(
                "{} already references {}",
                project_dir.display(),
                reference_path.display()
            );
            return Ok(LinkOutcome::AlreadyPresent);
        }

        let name = library_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        libraries.push(LeanLibraryReference::new(name, reference_path.clone()));
        self.project_manager
            .config_manager()
            .get_project_config(project_dir)
            .set(LIBRARIES_KEY, &libraries)?;
        info!(
            "Added {} to the libraries of {}",
            reference_path.display(),
            project_dir.display()
        );

        Ok(LinkOutcome::Added)
    }

    /// Removes the reference to `library_dir` from the project at `project_dir`.
    ///
    /// The library directory does not need to exist anymore.
    ///
    /// # Returns
    ///
    /// * `Ok(LinkOutcome::Removed)` if the configuration or project file changed.
    /// * `Ok(LinkOutcome::NotPresent)` if there was nothing to remove; nothing is written.
    pub fn remove_library_reference(
        &self,
        project_dir: &Path,
        library_dir: &Path,
    ) -> Result<LinkOutcome> {
        if !self.project_manager.is_project(project_dir) {
            return Err(LeanError::NotAProject(project_dir.to_path_buf()));
        }

        let reference_path = self.library_path_for_project_config(library_dir);
        let mut libraries = self.library_references(project_dir)?;
        let before = libraries.len();
        libraries.retain(|l| !l.points_to(&reference_path));

        let removed_from_config = libraries.len() != before;
        if removed_from_config {
            self.project_manager
                .config_manager()
                .get_project_config(project_dir)
                .set(LIBRARIES_KEY, &libraries)?;
            info!(
                "Removed {} from the libraries of {}",
                reference_path.display(),
                project_dir.display()
            );
        }

        let removed_from_csproj = self.remove_csproj_reference(project_dir, library_dir)?;

        if removed_from_config || removed_from_csproj {
            Ok(LinkOutcome::Removed)
        } else {
            debug!(
                "{} does not reference {}",
                project_dir.display(),
                reference_path.display()
            );
            Ok(LinkOutcome::NotPresent)
        }
    }

    fn add_csproj_reference(&self, project_dir: &Path, library_dir: &Path) -> Result<bool> {
        let csproj = self.project_manager.csproj_path(project_dir);
        if !csproj.is_file() {
            warn!(
                "{} not found, skipping the ProjectReference",
                csproj.display()
            );
            return Ok(false);
        }
        let include = self.csharp_library_csproj_path(project_dir, library_dir);
        self.xml_manager
            .add_project_reference(&csproj, &to_forward_slashes(&include))
    }

    fn remove_csproj_reference(&self, project_dir: &Path, library_dir: &Path) -> Result<bool> {
        let csproj = self.project_manager.csproj_path(project_dir);
        if !csproj.is_file() {
            return Ok(false);
        }
        let include = self.csharp_library_csproj_path(project_dir, library_dir);
        self.xml_manager
            .remove_project_reference(&csproj, &to_forward_slashes(&include))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectConfigManager;

    fn manager(root: &Path) -> LibraryManager {
        LibraryManager::new(
            root,
            ProjectManager::new(ProjectConfigManager::new()),
            XmlManager::new(),
        )
    }

    #[test]
    fn test_library_path_is_relative_to_root() {
        let manager = manager(Path::new("/work"));
        assert_eq!(
            manager.library_path_for_project_config(Path::new("/work/Library/CSharp Library")),
            PathBuf::from("Library/CSharp Library")
        );
    }

    #[test]
    fn test_csproj_path_for_top_level_project() {
        let manager = manager(Path::new("/work"));
        assert_eq!(
            manager.csharp_library_csproj_path(
                Path::new("/work/CSharp Project"),
                Path::new("/work/Library/CSharp Library")
            ),
            PathBuf::from("../Library/CSharp Library/CSharp Library.csproj")
        );
    }

    #[test]
    fn test_csproj_path_from_library_climbs_to_root() {
        let manager = manager(Path::new("/work"));
        assert_eq!(
            manager.csharp_library_csproj_path(
                Path::new("/work/Library/Consumer Library"),
                Path::new("/work/Library/CSharp Library")
            ),
            PathBuf::from("../../Library/CSharp Library/CSharp Library.csproj")
        );
    }

    #[test]
    fn test_paths_outside_root_are_not_libraries() {
        let manager = manager(Path::new("/work"));
        assert!(!manager.is_lean_library(Path::new("/elsewhere/Library/Lib")));
        assert!(!manager.is_lean_library(Path::new("/work/Library")));
    }
}
