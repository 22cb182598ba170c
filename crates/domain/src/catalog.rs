use indexmap::IndexMap;

use crate::{ConfigError, Name};

pub trait CatalogService {
    fn get_catalog(&self) -> Result<ExerciseCatalog, ConfigError>;
    fn add_exercise(&self, group: &Name, exercise: &Name) -> Result<bool, ConfigError>;
    fn remove_exercise(&self, group: &str, exercise: &str) -> Result<bool, ConfigError>;
    fn add_muscle_group(&self, group: &Name) -> Result<bool, ConfigError>;
    fn remove_muscle_group(&self, group: &str) -> Result<bool, ConfigError>;
}

/// Whole-structure persistence of the catalog.
///
/// Every mutation is written back completely. Concurrent writers are not coordinated, the
/// last write wins.
pub trait CatalogRepository {
    fn read_catalog(&self) -> Result<ExerciseCatalog, ConfigError>;
    fn write_catalog(&self, catalog: &ExerciseCatalog) -> Result<(), ConfigError>;
}

/// Muscle groups mapped to the names of their exercises.
///
/// Groups and exercises keep their insertion order. An exercise name appears at most once per
/// group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    groups: IndexMap<String, Vec<String>>,
}

impl ExerciseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(group, exercises)| (group.as_str(), exercises.as_slice()))
    }

    #[must_use]
    pub fn exercises(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, group: &str, exercise: &str) -> bool {
        self.exercises(group).iter().any(|e| e == exercise)
    }

    /// Append an exercise to a group, creating the group if necessary.
    ///
    /// Returns false and leaves the catalog untouched if the exercise is already present.
    pub fn add_exercise(&mut self, group: &str, exercise: &str) -> bool {
        let exercises = self.groups.entry(group.to_string()).or_default();
        if exercises.iter().any(|e| e == exercise) {
            return false;
        }
        exercises.push(exercise.to_string());
        true
    }

    pub fn remove_exercise(&mut self, group: &str, exercise: &str) -> bool {
        let Some(exercises) = self.groups.get_mut(group) else {
            return false;
        };
        let len = exercises.len();
        exercises.retain(|e| e != exercise);
        exercises.len() != len
    }

    pub fn add_muscle_group(&mut self, group: &str) -> bool {
        if self.groups.contains_key(group) {
            return false;
        }
        self.groups.insert(group.to_string(), vec![]);
        true
    }

    pub fn remove_muscle_group(&mut self, group: &str) -> bool {
        self.groups.shift_remove(group).is_some()
    }
}

impl From<IndexMap<String, Vec<String>>> for ExerciseCatalog {
    /// Duplicate exercise names inside a group are collapsed to their first occurrence.
    fn from(value: IndexMap<String, Vec<String>>) -> Self {
        let mut catalog = ExerciseCatalog::new();
        for (group, exercises) in value {
            catalog.add_muscle_group(&group);
            for exercise in exercises {
                catalog.add_exercise(&group, &exercise);
            }
        }
        catalog
    }
}

impl From<ExerciseCatalog> for IndexMap<String, Vec<String>> {
    fn from(value: ExerciseCatalog) -> Self {
        value.groups
    }
}

pub(crate) fn update_catalog<R: CatalogRepository>(
    repository: &R,
    update: impl FnOnce(&mut ExerciseCatalog) -> bool,
) -> Result<bool, ConfigError> {
    let mut catalog = repository.read_catalog()?;
    if !update(&mut catalog) {
        return Ok(false);
    }
    repository.write_catalog(&catalog)?;
    Ok(true)
}
