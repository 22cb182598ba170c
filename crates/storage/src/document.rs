//! Wire schema of the `workouts` collection.
//!
//! Documents are loosely typed. They are mapped onto `WorkoutEntry` here, and documents that
//! cannot be mapped are reported to the caller instead of reaching the domain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use liftlog_domain::{EntryID, NewEntry, WorkoutEntry};

#[derive(Deserialize, Debug, Default)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Option<DocumentID>,
    pub user: Option<String>,
    pub exercise: Option<String>,
    pub weight: Option<Number>,
    pub date: Option<String>,
    pub value: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DocumentID {
    ObjectID {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Text(String),
    Integer(i64),
}

impl From<DocumentID> for EntryID {
    fn from(value: DocumentID) -> Self {
        match value {
            DocumentID::ObjectID { oid } | DocumentID::Text(oid) => oid.into(),
            DocumentID::Integer(id) => id.to_string().into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn coerce(&self) -> Option<f64> {
        match self {
            Number::Float(value) => Some(*value),
            Number::Text(text) => text.replace(',', ".").trim().parse().ok(),
        }
        .filter(|value: &f64| value.is_finite())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error("legacy document without user and exercise")]
    Legacy,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("weight is not a number: {0:?}")]
    InvalidWeight(Number),
}

impl TryFrom<Document> for WorkoutEntry {
    type Error = DocumentError;

    fn try_from(value: Document) -> Result<Self, Self::Error> {
        if value.value.is_some() && value.user.is_none() && value.exercise.is_none() {
            return Err(DocumentError::Legacy);
        }

        let weight = value.weight.ok_or(DocumentError::MissingField("weight"))?;

        Ok(WorkoutEntry {
            id: value.id.map(EntryID::from).unwrap_or_default(),
            user: value.user.ok_or(DocumentError::MissingField("user"))?,
            exercise: value
                .exercise
                .ok_or(DocumentError::MissingField("exercise"))?,
            weight: weight
                .coerce()
                .ok_or_else(|| DocumentError::InvalidWeight(weight.clone()))?,
            date: value.date.ok_or(DocumentError::MissingField("date"))?,
        })
    }
}

/// Document written for a new entry. The store assigns the id.
#[derive(Serialize, Debug, PartialEq)]
pub struct NewDocument {
    pub user: String,
    pub exercise: String,
    pub weight: f64,
    pub date: String,
}

impl From<NewEntry> for NewDocument {
    fn from(value: NewEntry) -> Self {
        Self {
            user: value.user.into(),
            exercise: value.exercise.into(),
            weight: *value.weight,
            date: value.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Response of a collection read, either a bare array or wrapped in an envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Documents {
    List(Vec<Value>),
    Envelope { documents: Vec<Value> },
}

impl From<Documents> for Vec<Value> {
    fn from(value: Documents) -> Self {
        match value {
            Documents::List(documents) | Documents::Envelope { documents } => documents,
        }
    }
}
