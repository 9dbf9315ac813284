use crate::constants::{
    CONFIG_DIR_NAME, CREDENTIALS_FILE_NAME, GENERAL_CONFIG_FILE_NAME, LEAN_CONFIG_FILE_NAME,
};
use crate::error::{LeanError, Result};
use crate::fs::Storage;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Device names Windows refuses as a path component, with or without an extension.
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const FORBIDDEN_CHARACTERS: [char; 8] = ['\\', ':', '*', '?', '"', '<', '>', '|'];

/// Manages the location of the global configuration files.
pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    /// Creates a PathManager rooted at an explicit configuration directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a PathManager rooted at `~/.lean`.
    ///
    /// # Returns
    ///
    /// * `Ok(PathManager)` when the home directory is known.
    /// * `Err(LeanError::HomeDirNotFound)` otherwise.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(LeanError::HomeDirNotFound)?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME)))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the storage holding non-sensitive options.
    pub fn general_config_file(&self) -> PathBuf {
        self.config_dir.join(GENERAL_CONFIG_FILE_NAME)
    }

    /// Path of the storage holding credentials.
    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join(CREDENTIALS_FILE_NAME)
    }

    pub fn general_storage(&self) -> Storage {
        Storage::new(self.general_config_file())
    }

    pub fn credentials_storage(&self) -> Storage {
        Storage::new(self.credentials_file())
    }
}

/// Returns `destination` relative to `source`.
///
/// If `destination` does not lie beneath `source` it is returned unchanged.
pub fn relative_path(destination: &Path, source: &Path) -> PathBuf {
    destination
        .strip_prefix(source)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| destination.to_path_buf())
}

/// Returns whether `path` is valid on every supported operating system.
///
/// Windows rules are applied everywhere so projects stay portable.
pub fn is_path_valid(path: &Path) -> bool {
    path.components().all(|component| match component {
        Component::Normal(part) => match part.to_str() {
            Some(part) => is_component_valid(part),
            None => false,
        },
        _ => true,
    })
}

fn is_component_valid(component: &str) -> bool {
    if component.starts_with(' ') || component.ends_with(' ') || component.ends_with('.') {
        return false;
    }

    let upper = component.to_ascii_uppercase();
    let reserved = RESERVED_NAMES.iter().any(|name| {
        upper == *name
            || upper
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('.'))
    });
    if reserved {
        return false;
    }

    !component
        .chars()
        .any(|c| FORBIDDEN_CHARACTERS.contains(&c) || c.is_ascii_control())
}

/// Finds the CLI root: the nearest directory at or above `start` holding a `lean.json`.
pub fn find_cli_root(start: &Path) -> Result<PathBuf> {
    let root = start
        .ancestors()
        .find(|dir| dir.join(LEAN_CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| LeanError::CliRootNotFound(start.to_path_buf()))?;
    debug!("Resolved CLI root {}", root.display());
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_inside_source() {
        assert_eq!(
            relative_path(Path::new("/work/Library/Lib"), Path::new("/work")),
            PathBuf::from("Library/Lib")
        );
    }

    #[test]
    fn test_relative_path_outside_source_is_unchanged() {
        assert_eq!(
            relative_path(Path::new("/elsewhere/Lib"), Path::new("/work")),
            PathBuf::from("/elsewhere/Lib")
        );
    }

    #[test]
    fn test_path_validation() {
        assert!(is_path_valid(Path::new("/work/Library/My Library")));
        assert!(is_path_valid(Path::new("relative/ok.py")));
        assert!(!is_path_valid(Path::new("/work/ leading")));
        assert!(!is_path_valid(Path::new("/work/trailing ")));
        assert!(!is_path_valid(Path::new("/work/trailing.")));
        assert!(!is_path_valid(Path::new("/work/CON")));
        assert!(!is_path_valid(Path::new("/work/con.txt")));
        assert!(!is_path_valid(Path::new("/work/a|b")));
        assert!(!is_path_valid(Path::new("/work/what?")));
        // Names that merely start with a reserved word are fine.
        assert!(is_path_valid(Path::new("/work/CONTROLLER")));
        assert!(is_path_valid(Path::new("/work/COM10")));
    }

    #[test]
    fn test_storage_locations() {
        let manager = PathManager::new("/home/user/.lean");
        assert_eq!(
            manager.general_config_file(),
            PathBuf::from("/home/user/.lean/config")
        );
        assert_eq!(
            manager.credentials_storage().path(),
            Path::new("/home/user/.lean/credentials")
        );
    }

    #[test]
    fn test_find_cli_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lean.json"), "{}").unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_cli_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn test_find_cli_root_missing() {
        let dir = tempfile::tempdir().unwrap();
        // Tempdirs normally have no lean.json above them; guard against odd hosts.
        if dir.path().ancestors().any(|d| d.join("lean.json").is_file()) {
            return;
        }
        assert!(matches!(
            find_cli_root(dir.path()),
            Err(LeanError::CliRootNotFound(_))
        ));
    }
}
