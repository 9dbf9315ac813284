//! Test fixtures, available with the `test-utils` feature.

use crate::config::OptionRegistry;
use crate::fs::PathManager;
use crate::library::LibraryManager;
use crate::model::Language;
use crate::project::{ProjectConfigManager, ProjectManager};
use crate::xml::XmlManager;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CSPROJ_TEMPLATE: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net6.0</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="QuantConnect.Lean" Version="2.5.*" />
  </ItemGroup>
</Project>
"#;

/// A throwaway CLI root with two projects and two libraries.
///
/// Layout:
/// - `lean.json`
/// - `Python Project/`, `CSharp Project/`
/// - `Library/Python Library/`, `Library/CSharp Library/`
/// - `.lean/` as the global configuration directory
pub struct FakeCliDirectory {
    tempdir: TempDir,
}

impl FakeCliDirectory {
    pub fn new() -> std::io::Result<Self> {
        let fixture = Self {
            tempdir: tempfile::tempdir()?,
        };
        fs::write(fixture.root().join("lean.json"), "{\n  \"data-folder\": \"data\"\n}\n")?;
        fs::create_dir_all(fixture.root().join("data"))?;
        fixture.create_project("Python Project", Language::Python)?;
        fixture.create_project("CSharp Project", Language::CSharp)?;
        fixture.create_project("Library/Python Library", Language::Python)?;
        fixture.create_project("Library/CSharp Library", Language::CSharp)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// Creates a project at `relative` with a `config.json` and language-specific sources.
    pub fn create_project(
        &self,
        relative: impl AsRef<Path>,
        language: Language,
    ) -> std::io::Result<PathBuf> {
        let dir = self.path(relative);
        fs::create_dir_all(&dir)?;

        let config = serde_json::json!({
            "algorithm-language": language,
            "parameters": {},
            "description": "",
        });
        fs::write(
            dir.join("config.json"),
            serde_json::to_string_pretty(&config)?,
        )?;

        match language {
            Language::Python => fs::write(dir.join("main.py"), "# region imports\n")?,
            Language::CSharp => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                fs::write(dir.join("Main.cs"), "namespace QuantConnect.Algorithm.CSharp {}\n")?;
                fs::write(dir.join(format!("{}.csproj", name)), CSPROJ_TEMPLATE)?;
            }
        }
        Ok(dir)
    }

    pub fn path_manager(&self) -> PathManager {
        PathManager::new(self.path(".lean"))
    }

    pub fn registry(&self) -> OptionRegistry {
        OptionRegistry::from_path_manager(&self.path_manager())
    }

    pub fn library_manager(&self) -> LibraryManager {
        LibraryManager::new(
            self.root(),
            ProjectManager::new(ProjectConfigManager::new()),
            XmlManager::new(),
        )
    }
}
