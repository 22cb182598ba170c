//! Catalog File
//!
//! The exercise catalog is kept in a local JSON object mapping muscle groups to arrays of
//! exercise names. A missing or blank file is an empty catalog.

use std::{fs, io, path::PathBuf};

use indexmap::IndexMap;
use liftlog_domain as domain;
use log::debug;

pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl domain::CatalogRepository for CatalogFile {
    fn read_catalog(&self) -> Result<domain::ExerciseCatalog, domain::ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("catalog file {} not found", self.path.display());
                return Ok(domain::ExerciseCatalog::new());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(domain::ExerciseCatalog::new());
        }

        serde_json::from_str::<IndexMap<String, Vec<String>>>(&content)
            .map(domain::ExerciseCatalog::from)
            .map_err(|err| domain::ConfigError::Malformed(err.to_string()))
    }

    fn write_catalog(&self, catalog: &domain::ExerciseCatalog) -> Result<(), domain::ConfigError> {
        let groups = IndexMap::from(catalog.clone());
        let content = serde_json::to_string_pretty(&groups)
            .map_err(|err| domain::ConfigError::Malformed(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!("wrote catalog to {}", self.path.display());
        Ok(())
    }
}
