use crate::constants::DEFAULT_IMAGE_VERSION;
use crate::error::LeanError;
use std::fmt;
use std::str::FromStr;

/// A docker image reference split into its name and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerImage {
    pub name: String,
    pub tag: String,
}

impl DockerImage {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parses `name[:tag]`, defaulting the tag to `latest`.
    ///
    /// A colon followed by a `/` belongs to a registry port (`host:5000/image`), not a tag.
    pub fn parse(image: &str) -> Result<Self, LeanError> {
        let image = image.trim();
        let (name, tag) = match image.rsplit_once(':') {
            Some((name, tag)) if !tag.contains('/') => (name, tag),
            _ => (image, DEFAULT_IMAGE_VERSION),
        };

        if name.is_empty() || tag.is_empty() || name.ends_with('/') {
            return Err(LeanError::InvalidImage(image.to_string()));
        }

        Ok(Self::new(name, tag))
    }
}

impl FromStr for DockerImage {
    type Err = LeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DockerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// Composes an image name from its base name and an optional version tag.
///
/// An empty or missing version falls back to [`DEFAULT_IMAGE_VERSION`].
pub fn image_name(base_name: &str, version: Option<&str>) -> String {
    let tag = version
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_IMAGE_VERSION);
    format!("{}:{}", base_name, tag)
}
