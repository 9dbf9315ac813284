use crate::error::{LeanError, Result};
use crate::fs::Storage;
use crate::model::DockerImage;
use log::debug;

/// Defines which values an option accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Any non-empty text.
    Plain,
    /// One of a fixed set of values, compared case-insensitively.
    Choice(&'static [&'static str]),
    /// A docker image name, stored as `name:tag`.
    Image,
}

/// A named, persisted configuration value.
///
/// The option itself only carries metadata; its value is read from and written
/// to the backing [`Storage`] on every access.
#[derive(Debug, Clone)]
pub struct ConfigOption {
    key: &'static str,
    description: &'static str,
    is_sensitive: bool,
    storage: Storage,
    default: Option<&'static str>,
    kind: OptionKind,
}

impl ConfigOption {
    /// Creates an option accepting any non-empty value.
    pub fn plain(
        key: &'static str,
        description: &'static str,
        is_sensitive: bool,
        storage: Storage,
    ) -> Self {
        Self {
            key,
            description,
            is_sensitive,
            storage,
            default: None,
            kind: OptionKind::Plain,
        }
    }

    /// Creates an option restricted to `choices`.
    pub fn choice(
        key: &'static str,
        description: &'static str,
        choices: &'static [&'static str],
        is_sensitive: bool,
        storage: Storage,
    ) -> Self {
        Self {
            kind: OptionKind::Choice(choices),
            ..Self::plain(key, description, is_sensitive, storage)
        }
    }

    /// Creates an option holding a docker image name.
    pub fn image(key: &'static str, description: &'static str, storage: Storage) -> Self {
        Self {
            kind: OptionKind::Image,
            ..Self::plain(key, description, false, storage)
        }
    }

    /// Sets the value returned by [`get_value`](Self::get_value) when nothing is stored.
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Checks `value` against this option's rules.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` with the value to persist (choices use their canonical spelling).
    /// * `Err(LeanError::EmptyValue)` for blank values.
    /// * `Err(LeanError::InvalidChoice)` for values outside the allowed set.
    /// * `Err(LeanError::InvalidImage)` for malformed image names.
    pub fn validate(&self, value: &str) -> Result<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LeanError::EmptyValue(self.key.to_string()));
        }

        match &self.kind {
            OptionKind::Plain => Ok(value.to_string()),
            OptionKind::Choice(choices) => choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(value))
                .map(|choice| choice.to_string())
                .ok_or_else(|| LeanError::InvalidChoice {
                    key: self.key.to_string(),
                    value: value.to_string(),
                    allowed: choices.iter().map(|c| c.to_string()).collect(),
                }),
            OptionKind::Image => Ok(DockerImage::parse(value)?.to_string()),
        }
    }

    /// Returns the stored value, or the default when nothing is stored.
    pub fn get_value(&self) -> Result<Option<String>> {
        match self.storage.get::<String>(self.key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.default.map(str::to_string)),
        }
    }

    /// Whether a value is explicitly stored (defaults do not count).
    pub fn is_set(&self) -> Result<bool> {
        self.storage.has(self.key)
    }

    /// Validates and persists `value`. Invalid values never reach the storage.
    pub fn set_value(&self, value: &str) -> Result<()> {
        let value = self.validate(value)?;
        debug!("Setting option '{}'", self.key);
        self.storage.set(self.key, &value)
    }

    /// Removes the stored value. Returns whether one was present.
    pub fn unset(&self) -> Result<bool> {
        debug!("Unsetting option '{}'", self.key);
        self.storage.delete(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGUAGES: &[&str] = &["python", "csharp"];

    fn storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("config"));
        (dir, storage)
    }

    #[test]
    fn test_choice_rejects_unknown_values_before_writing() {
        let (_dir, storage) = storage();
        let option = ConfigOption::choice("default-language", "", LANGUAGES, false, storage);

        for value in ["java", "py", "c#", "pythonx"] {
            assert!(matches!(
                option.set_value(value),
                Err(LeanError::InvalidChoice { .. })
            ));
        }
        assert!(!option.storage().path().exists());
    }

    #[test]
    fn test_choice_stores_canonical_spelling() {
        let (_dir, storage) = storage();
        let option = ConfigOption::choice("default-language", "", LANGUAGES, false, storage);

        option.set_value("CSharp").unwrap();
        assert_eq!(option.get_value().unwrap().as_deref(), Some("csharp"));
    }

    #[test]
    fn test_default_is_returned_until_set() {
        let (_dir, storage) = storage();
        let option = ConfigOption::choice("default-language", "", LANGUAGES, false, storage)
            .with_default("python");

        assert_eq!(option.get_value().unwrap().as_deref(), Some("python"));
        assert!(!option.is_set().unwrap());

        option.set_value("csharp").unwrap();
        assert!(option.is_set().unwrap());
        assert!(option.unset().unwrap());
        assert_eq!(option.get_value().unwrap().as_deref(), Some("python"));
    }

    #[test]
    fn test_plain_rejects_blank_values() {
        let (_dir, storage) = storage();
        let option = ConfigOption::plain("user-id", "", true, storage);

        assert!(matches!(option.set_value("   "), Err(LeanError::EmptyValue(_))));
        option.set_value(" 12345 ").unwrap();
        assert_eq!(option.get_value().unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_image_validates_through_docker_image() {
        let (_dir, storage) = storage();
        let option = ConfigOption::image("engine-image", "", storage);

        assert!(matches!(option.set_value("lean:"), Err(LeanError::InvalidImage(_))));
        assert!(!option.storage().path().exists());

        option.set_value("registry:5000/lean").unwrap();
        assert_eq!(
            option.get_value().unwrap().as_deref(),
            Some("registry:5000/lean:latest")
        );
    }
}
