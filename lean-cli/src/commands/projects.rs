use crate::error::Result;
use lean_core::LibraryManager;
use std::io::Write;

/// `lean projects`
///
/// One line per project, relative to the CLI root, with its language and the
/// number of libraries it references.
pub fn list(manager: &LibraryManager, out: &mut dyn Write) -> Result<()> {
    let project_manager = manager.project_manager();
    let projects = project_manager.list_projects(manager.cli_root());
    if projects.is_empty() {
        writeln!(out, "No projects found in {}", manager.cli_root().display())?;
        return Ok(());
    }

    for project in projects {
        let relative = project.strip_prefix(manager.cli_root()).unwrap_or(&project);
        let language = project_manager
            .project_language(&project)
            .map(|language| language.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let kind = if manager.is_lean_library(&project) {
            "library"
        } else {
            "project"
        };
        let libraries = manager.library_references(&project)?.len();
        writeln!(
            out,
            "{} ({} {}, {} {})",
            relative.display(),
            language,
            kind,
            libraries,
            if libraries == 1 { "library" } else { "libraries" }
        )?;
    }
    Ok(())
}
