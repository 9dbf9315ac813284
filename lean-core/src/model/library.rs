use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An entry of a project's `libraries` list.
///
/// `path` is relative to the CLI root so the configuration stays portable across
/// machines. It is always written with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeanLibraryReference {
    #[serde(default)]
    pub name: String,
    pub path: PathBuf,
}

impl LeanLibraryReference {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Whether this entry points at `path`, ignoring separator style.
    pub fn points_to(&self, path: &Path) -> bool {
        to_forward_slashes(&self.path) == to_forward_slashes(path)
    }
}

/// Renders `path` with `/` separators regardless of platform.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Result of adding or removing a library reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The reference was added and the configuration persisted.
    Added,
    /// The reference already existed; nothing was written.
    AlreadyPresent,
    /// The reference was removed and the configuration persisted.
    Removed,
    /// There was no such reference; nothing was written.
    NotPresent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_without_name_deserializes() {
        let reference: LeanLibraryReference =
            serde_json::from_str(r#"{"path": "Library/My Lib"}"#).unwrap();
        assert_eq!(reference.name, "");
        assert!(reference.points_to(Path::new("Library/My Lib")));
    }

    #[test]
    fn test_points_to_ignores_separator_style() {
        let reference = LeanLibraryReference::new("Lib", "Library\\Lib");
        assert!(reference.points_to(Path::new("Library/Lib")));
        assert!(!reference.points_to(Path::new("Library/Other")));
    }
}
