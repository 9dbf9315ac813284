//! Subcommand implementations.
//!
//! Every command writes its user-facing output to the given writer so it can be
//! checked in tests; diagnostics go through `log`.

pub mod auth;
pub mod config;
pub mod image;
pub mod library;
pub mod projects;

use crate::args::{Cli, Commands, ConfigCommands, LibraryCommands};
use crate::error::Result;
use lean_core::fs::find_cli_root;
use lean_core::project::{ProjectConfigManager, ProjectManager};
use lean_core::xml::XmlManager;
use lean_core::{LibraryManager, OptionRegistry, PathManager};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dispatches the parsed command line.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let paths = match &cli.config_dir {
        Some(dir) => PathManager::new(resolve_path(dir)?),
        None => PathManager::from_home()?,
    };
    debug!("Using configuration directory {}", paths.config_dir().display());
    let registry = OptionRegistry::from_path_manager(&paths);

    match &cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Set { key, value } => config::set(&registry, key, value, out),
            ConfigCommands::Get { key } => config::get(&registry, key, out),
            ConfigCommands::Unset { key } => config::unset(&registry, key, out),
            ConfigCommands::List => config::list(&registry, out),
        },
        Commands::Login { user_id, api_token } => auth::login(
            &registry,
            &auth::TerminalPrompt,
            user_id.as_deref(),
            api_token.as_deref(),
            out,
        ),
        Commands::Logout => auth::logout(&paths, out),
        Commands::Library { command } => {
            let manager = library_manager(cli.root.as_deref())?;
            match command {
                LibraryCommands::Add { project, library } => {
                    library::add(&manager, &resolve_path(project)?, &resolve_path(library)?, out)
                }
                LibraryCommands::Remove { project, library } => {
                    library::remove(&manager, &resolve_path(project)?, &resolve_path(library)?, out)
                }
                LibraryCommands::List { project } => {
                    library::list(&manager, &resolve_path(project)?, out)
                }
            }
        }
        Commands::Projects => projects::list(&library_manager(cli.root.as_deref())?, out),
        Commands::Image {
            research,
            version,
            image,
        } => image::print(&registry, *research, version.as_deref(), image.as_deref(), out),
    }
}

/// Builds the library manager for `root`, or for the CLI root containing the
/// current directory.
fn library_manager(root: Option<&Path>) -> Result<LibraryManager> {
    let cli_root = match root {
        Some(root) => resolve_path(root)?,
        None => find_cli_root(&std::env::current_dir()?)?,
    };
    debug!("Using CLI root {}", cli_root.display());
    Ok(LibraryManager::new(
        cli_root,
        ProjectManager::new(ProjectConfigManager::new()),
        XmlManager::new(),
    ))
}

/// Makes `path` absolute and resolves symlinks.
///
/// Paths that no longer exist (a deleted library being unlinked) are resolved
/// through their parent directory when possible.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return Ok(canonical);
    }
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    };
    Ok(resolved)
}
