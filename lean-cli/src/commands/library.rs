use crate::error::Result;
use lean_core::{LeanError, LibraryManager, LinkOutcome};
use std::io::Write;
use std::path::Path;

fn display_relative<'a>(manager: &LibraryManager, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(manager.cli_root())
        .unwrap_or(path)
        .display()
}

/// `lean library add <project> <library>`
pub fn add(
    manager: &LibraryManager,
    project: &Path,
    library: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let outcome = manager.add_library_reference(project, library)?;
    let (project, library) = (display_relative(manager, project), display_relative(manager, library));
    match outcome {
        LinkOutcome::AlreadyPresent => {
            writeln!(out, "'{}' already references '{}'", project, library)?
        }
        _ => writeln!(out, "Successfully added '{}' to '{}'", library, project)?,
    }
    Ok(())
}

/// `lean library remove <project> <library>`
pub fn remove(
    manager: &LibraryManager,
    project: &Path,
    library: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let outcome = manager.remove_library_reference(project, library)?;
    let (project, library) = (display_relative(manager, project), display_relative(manager, library));
    match outcome {
        LinkOutcome::NotPresent => writeln!(out, "'{}' does not reference '{}'", project, library)?,
        _ => writeln!(out, "Successfully removed '{}' from '{}'", library, project)?,
    }
    Ok(())
}

/// `lean library list <project>`
pub fn list(manager: &LibraryManager, project: &Path, out: &mut dyn Write) -> Result<()> {
    if !manager.project_manager().is_project(project) {
        return Err(LeanError::NotAProject(project.to_path_buf()).into());
    }
    let references = manager.library_references(project)?;
    if references.is_empty() {
        writeln!(
            out,
            "'{}' does not reference any libraries",
            display_relative(manager, project)
        )?;
    }
    for reference in references {
        writeln!(out, "{}", reference.path.display())?;
    }
    Ok(())
}
