use std::path::PathBuf;

pub const STORE_URL_VAR: &str = "LIFTLOG_STORE_URL";
pub const DEFAULT_CATALOG_PATH: &str = "exercise_config.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_url: String,
    pub catalog_path: PathBuf,
    pub theme: Theme,
}

impl Settings {
    pub fn new(
        store_url: Option<String>,
        catalog_path: PathBuf,
        theme: Theme,
    ) -> Result<Self, SettingsError> {
        let store_url = store_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingStoreUrl)?;
        Ok(Self {
            store_url,
            catalog_path,
            theme,
        })
    }

    /// Read the store connection string from the environment.
    pub fn from_env(catalog_path: PathBuf, theme: Theme) -> Result<Self, SettingsError> {
        Self::new(std::env::var(STORE_URL_VAR).ok(), catalog_path, theme)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("{STORE_URL_VAR} is not set")]
    MissingStoreUrl,
}

#[derive(clap::ValueEnum, strum::Display, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
