use log::{debug, error};

use crate::{
    Cache, CatalogRepository, CatalogService, ConfigError, CreateError, EntryRepository,
    EntryService, ExerciseCatalog, Name, NewEntry, ReadError, TrendRow, WorkoutEntry,
    catalog::update_catalog, compute_series, distinct_users,
};

pub struct Service<R> {
    repository: R,
    entries: Cache<Name, Vec<WorkoutEntry>>,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            entries: Cache::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

fn log_catalog_error<T>(result: Result<T, ConfigError>, action: &str) -> Result<T, ConfigError> {
    if let Err(ref err) = result {
        error!("failed to {action}: {err}");
    }
    result
}

impl<R: EntryRepository> EntryService for Service<R> {
    async fn get_entries(&self) -> Result<Vec<WorkoutEntry>, ReadError> {
        log_on_error!(
            self.repository.read_entries(),
            ReadError,
            "get",
            "entries"
        )
    }

    async fn get_user_entries(&self, user: &Name) -> Result<Vec<WorkoutEntry>, ReadError> {
        self.entries
            .get_or_try_insert_with(user.clone(), move || async move {
                Ok::<_, ReadError>(
                    self.get_entries()
                        .await?
                        .into_iter()
                        .filter(|e| e.user == user.as_str())
                        .collect(),
                )
            })
            .await
    }

    async fn get_users(&self) -> Result<Vec<String>, ReadError> {
        Ok(distinct_users(&self.get_entries().await?))
    }

    async fn get_series(&self, user: &Name, exercise: &str) -> Result<Vec<TrendRow>, ReadError> {
        let entries = self.get_user_entries(user).await?;
        Ok(compute_series(&entries, user.as_str(), exercise))
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<(), CreateError> {
        let user = entry.user.clone();
        log_on_error!(
            self.repository.create_entry(entry),
            CreateError,
            "create",
            "entry"
        )?;
        if self.entries.invalidate(&user) {
            debug!("invalidated cached entries of {user}");
        }
        Ok(())
    }
}

impl<R: CatalogRepository> CatalogService for Service<R> {
    fn get_catalog(&self) -> Result<ExerciseCatalog, ConfigError> {
        log_catalog_error(self.repository.read_catalog(), "get catalog")
    }

    fn add_exercise(&self, group: &Name, exercise: &Name) -> Result<bool, ConfigError> {
        log_catalog_error(
            update_catalog(&self.repository, |catalog| {
                catalog.add_exercise(group.as_str(), exercise.as_str())
            }),
            "add exercise",
        )
    }

    fn remove_exercise(&self, group: &str, exercise: &str) -> Result<bool, ConfigError> {
        log_catalog_error(
            update_catalog(&self.repository, |catalog| {
                catalog.remove_exercise(group.trim(), exercise.trim())
            }),
            "remove exercise",
        )
    }

    fn add_muscle_group(&self, group: &Name) -> Result<bool, ConfigError> {
        log_catalog_error(
            update_catalog(&self.repository, |catalog| {
                catalog.add_muscle_group(group.as_str())
            }),
            "add muscle group",
        )
    }

    fn remove_muscle_group(&self, group: &str) -> Result<bool, ConfigError> {
        log_catalog_error(
            update_catalog(&self.repository, |catalog| {
                catalog.remove_muscle_group(group.trim())
            }),
            "remove muscle group",
        )
    }
}
