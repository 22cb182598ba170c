use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_more::{Deref, Display, Into};

use crate::{CreateError, Name, ReadError, TrendRow, ValidationError};

#[allow(async_fn_in_trait)]
pub trait EntryService {
    async fn get_entries(&self) -> Result<Vec<WorkoutEntry>, ReadError>;
    async fn get_user_entries(&self, user: &Name) -> Result<Vec<WorkoutEntry>, ReadError>;
    async fn get_users(&self) -> Result<Vec<String>, ReadError>;
    async fn get_series(&self, user: &Name, exercise: &str) -> Result<Vec<TrendRow>, ReadError>;
    async fn create_entry(&self, entry: NewEntry) -> Result<(), CreateError>;

    fn validate_name(&self, name: &str) -> Result<Name, ValidationError> {
        Ok(Name::new(name)?)
    }

    fn validate_weight(&self, weight: &str) -> Result<Weight, ValidationError> {
        Ok(Weight::try_from(weight)?)
    }

    fn validate_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| ValidationError::Date)
    }
}

#[allow(async_fn_in_trait)]
pub trait EntryRepository {
    async fn read_entries(&self) -> Result<Vec<WorkoutEntry>, ReadError>;
    async fn create_entry(&self, entry: NewEntry) -> Result<(), CreateError>;
}

/// A recorded observation as it is held by the store.
///
/// The date is kept in its stored form. It is normalized when a series is computed, so
/// entries with an unusable date are still listed but never charted.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub id: EntryID,
    pub user: String,
    pub exercise: String,
    pub weight: f64,
    pub date: String,
}

/// Names of all users having entries, sorted and without duplicates.
#[must_use]
pub fn distinct_users(entries: &[WorkoutEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.user.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Deref, Display, Into, Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryID(String);

impl From<String> for EntryID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A validated entry ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub user: Name,
    pub exercise: Name,
    pub weight: Weight,
    pub date: NaiveDate,
}

#[derive(Deref, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::ParseError);
        }

        if value <= 0.0 {
            return Err(WeightError::NonPositive);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f64>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be a positive decimal number")]
    NonPositive,
    #[error("Weight must be a decimal number")]
    ParseError,
}
