use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Saves a serializable document to a file atomically.
///
/// The document is written to a sibling temporary file first and then renamed
/// over the target, so readers never observe a half-written file.
///
/// # Arguments
///
/// * `path` - The target file path.
/// * `document` - The object to serialize and save.
///
/// # Returns
///
/// * `Ok(())` on success.
/// * `Err` on serialization or IO failure.
pub fn save_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(document).context("Failed to serialize document")?;

    // Appending keeps extension-less files (e.g. `credentials`) distinct from their temp file.
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut temp_file = std::fs::File::create(temp_path)
        .with_context(|| format!("Failed to create temp file {}", temp_path.display()))?;
    temp_file
        .write_all(json.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.write_all(b"\n").context("Failed to write to temp file")?;
    temp_file.sync_all().context("Failed to sync temp file")?;

    std::fs::rename(temp_path, path)
        .with_context(|| format!("Failed to move temp file to {}", path.display()))?;

    Ok(())
}

/// Loads a deserializable document from a file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    let document = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize {}", path.display()))?;
    Ok(Some(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/credentials");

        let mut doc = BTreeMap::new();
        doc.insert("user-id", "123");
        save_document(&path, &doc).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested/credentials.tmp").exists());

        let loaded: BTreeMap<String, String> = load_document(&path).unwrap().unwrap();
        assert_eq!(loaded.get("user-id").map(String::as_str), Some("123"));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<serde_json::Value> = load_document(&dir.path().join("absent")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_document::<serde_json::Value>(&path).is_err());
    }
}
