#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod cache;
pub mod catalog;
mod entry;
mod error;
mod name;
pub mod progression;
mod service;
mod session;

pub use cache::Cache;
pub use catalog::{CatalogRepository, CatalogService, ExerciseCatalog};
pub use entry::{
    EntryID, EntryRepository, EntryService, NewEntry, Weight, WeightError, WorkoutEntry,
    distinct_users,
};
pub use error::{
    BoxError, ConfigError, CreateError, ReadError, StorageError, ValidationError,
};
pub use name::{Name, NameError};
pub use progression::{
    Trend, TrendRow, compute_series, display_order, format_for_chart, normalize_date,
};
pub use service::Service;
pub use session::Session;
