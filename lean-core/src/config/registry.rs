use crate::config::option::ConfigOption;
use crate::constants::{
    CONFIG_SET_HELP_URL, DEFAULT_ENGINE_IMAGE, DEFAULT_ENGINE_IMAGE_BASE_NAME,
    DEFAULT_RESEARCH_IMAGE, DEFAULT_RESEARCH_IMAGE_BASE_NAME,
};
use crate::error::{LeanError, Result};
use crate::fs::{PathManager, Storage};
use crate::model::{image_name, DockerImage, Language};

const LANGUAGE_CHOICES: &[&str] = &["python", "csharp"];

/// The table of every configurable option.
///
/// Built once at startup and handed out by reference; options never change after
/// construction, only their stored values do.
pub struct OptionRegistry {
    user_id: ConfigOption,
    api_token: ConfigOption,
    default_language: ConfigOption,
    engine_image: ConfigOption,
    research_image: ConfigOption,
}

impl OptionRegistry {
    /// Creates the registry.
    ///
    /// # Arguments
    ///
    /// * `general` - Storage for non-sensitive options.
    /// * `credentials` - Storage for credentials.
    pub fn new(general: Storage, credentials: Storage) -> Self {
        Self {
            user_id: ConfigOption::plain(
                "user-id",
                "The user id used when making authenticated requests to the API.",
                true,
                credentials.clone(),
            ),
            api_token: ConfigOption::plain(
                "api-token",
                "The API token used when making authenticated requests to the API.",
                true,
                credentials,
            ),
            default_language: ConfigOption::choice(
                "default-language",
                "The default language used when creating new projects.",
                LANGUAGE_CHOICES,
                false,
                general.clone(),
            )
            .with_default("python"),
            engine_image: ConfigOption::image(
                "engine-image",
                "The docker image used when running the engine.",
                general.clone(),
            ),
            research_image: ConfigOption::image(
                "research-image",
                "The docker image used when running the research environment.",
                general,
            ),
        }
    }

    /// Creates the registry over the storages located by `paths`.
    pub fn from_path_manager(paths: &PathManager) -> Self {
        Self::new(paths.general_storage(), paths.credentials_storage())
    }

    /// All options in registration order.
    pub fn options(&self) -> [&ConfigOption; 5] {
        [
            &self.user_id,
            &self.api_token,
            &self.default_language,
            &self.engine_image,
            &self.research_image,
        ]
    }

    /// Returns the option matching `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(&ConfigOption)` whose key equals `key`.
    /// * `Err(LeanError::UnknownOption)` carrying a documentation link otherwise.
    pub fn get_option_by_key(&self, key: &str) -> Result<&ConfigOption> {
        self.options()
            .into_iter()
            .find(|option| option.key() == key)
            .ok_or_else(|| LeanError::UnknownOption {
                key: key.to_string(),
                help: CONFIG_SET_HELP_URL.to_string(),
            })
    }

    pub fn user_id(&self) -> &ConfigOption {
        &self.user_id
    }

    pub fn api_token(&self) -> &ConfigOption {
        &self.api_token
    }

    pub fn engine_image_option(&self) -> &ConfigOption {
        &self.engine_image
    }

    pub fn research_image_option(&self) -> &ConfigOption {
        &self.research_image
    }

    /// The language new projects are created in.
    pub fn default_language(&self) -> Result<Language> {
        let value = self
            .default_language
            .get_value()?
            .unwrap_or_else(|| Language::Python.option_value().to_string());
        value.parse().map_err(|_| LeanError::InvalidChoice {
            key: self.default_language.key().to_string(),
            value,
            allowed: LANGUAGE_CHOICES.iter().map(|c| c.to_string()).collect(),
        })
    }

    pub fn default_language_option(&self) -> &ConfigOption {
        &self.default_language
    }

    /// Engine image name for `version`, defaulting the tag.
    pub fn engine_image_name_from_version(version: Option<&str>) -> String {
        image_name(DEFAULT_ENGINE_IMAGE_BASE_NAME, version)
    }

    /// Research image name for `version`, defaulting the tag.
    pub fn research_image_name_from_version(version: Option<&str>) -> String {
        image_name(DEFAULT_RESEARCH_IMAGE_BASE_NAME, version)
    }

    /// The engine image: `image_name` when given, else the default engine image.
    pub fn engine_image(image_name: Option<&str>) -> Result<DockerImage> {
        DockerImage::parse(image_name.unwrap_or(DEFAULT_ENGINE_IMAGE))
    }

    /// The research image: `image_name` when given, else the default research image.
    pub fn research_image(image_name: Option<&str>) -> Result<DockerImage> {
        DockerImage::parse(image_name.unwrap_or(DEFAULT_RESEARCH_IMAGE))
    }

    /// Engine image honouring, in order, `override_name`, the `engine-image` option and the default.
    pub fn resolve_engine_image(&self, override_name: Option<&str>) -> Result<DockerImage> {
        let configured = self.engine_image.get_value()?;
        Self::engine_image(override_name.or(configured.as_deref()))
    }

    /// Research image honouring, in order, `override_name`, the `research-image` option and the default.
    pub fn resolve_research_image(&self, override_name: Option<&str>) -> Result<DockerImage> {
        let configured = self.research_image.get_value()?;
        Self::research_image(override_name.or(configured.as_deref()))
    }
}
