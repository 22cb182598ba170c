#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Record Store Gateway
//!
//! Workout entries live in a remote document store and are accessed over HTTP. The exercise
//! catalog lives in a local JSON file. `Gateway` combines both behind the repository traits of
//! the domain.

use std::path::PathBuf;

use liftlog_domain::{self as domain, CatalogRepository, EntryRepository};

pub mod catalog_file;
pub mod document;
pub mod rest;

pub use catalog_file::CatalogFile;
pub use rest::{REST, ReqwestSendRequest, SendRequest};

pub struct Gateway<S: SendRequest> {
    pub rest: REST<S>,
    pub catalog: CatalogFile,
}

impl Gateway<ReqwestSendRequest> {
    pub fn connect(
        store_url: &str,
        catalog_path: impl Into<PathBuf>,
    ) -> Result<Self, domain::StorageError> {
        Ok(Self {
            rest: REST::new(store_url)?,
            catalog: CatalogFile::new(catalog_path),
        })
    }
}

impl<S: SendRequest> EntryRepository for Gateway<S> {
    async fn read_entries(&self) -> Result<Vec<domain::WorkoutEntry>, domain::ReadError> {
        self.rest.read_entries().await
    }

    async fn create_entry(&self, entry: domain::NewEntry) -> Result<(), domain::CreateError> {
        self.rest.create_entry(entry).await
    }
}

impl<S: SendRequest> CatalogRepository for Gateway<S> {
    fn read_catalog(&self) -> Result<domain::ExerciseCatalog, domain::ConfigError> {
        self.catalog.read_catalog()
    }

    fn write_catalog(&self, catalog: &domain::ExerciseCatalog) -> Result<(), domain::ConfigError> {
        self.catalog.write_catalog(catalog)
    }
}
