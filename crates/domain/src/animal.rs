//! Animal: a free-form record with store-managed timestamps.
//!
//! The caller decides which fields an animal carries; nothing is validated.
//! Only `created_at` and `updated_at` belong to the store, and caller input
//! for those keys is discarded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::AnimalId;
use crate::time::Timestamp;

/// Fields every new animal starts with, set to an empty string.
pub const TEMPLATE_FIELDS: [&str; 7] = [
    "pet_name",
    "description",
    "animal_type",
    "pet_age",
    "sex",
    "color",
    "image_url",
];

/// Key of the creation timestamp.
pub const CREATED_AT: &str = "created_at";

/// Key of the last-modification timestamp.
pub const UPDATED_AT: &str = "updated_at";

/// Caller-supplied fields, as a JSON object minus the managed timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AnimalFields(Map<String, Value>);

impl From<Map<String, Value>> for AnimalFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .filter(|(key, _)| key != CREATED_AT && key != UPDATED_AT)
                .collect(),
        )
    }
}

impl AnimalFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, ignoring managed keys.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != CREATED_AT && key != UPDATED_AT {
            self.0.insert(key, value.into());
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Overwrite `self` with every key present in `other`.
    fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    fn template() -> Self {
        Self(
            TEMPLATE_FIELDS
                .iter()
                .map(|key| ((*key).to_string(), Value::String(String::new())))
                .collect(),
        )
    }
}

/// One animal record as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    #[serde(flatten)]
    pub fields: AnimalFields,
    #[serde(with = "crate::time::iso8601")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso8601")]
    pub updated_at: Timestamp,
}

impl Animal {
    /// Build a new record: the empty template, overlaid with `fields`,
    /// with both timestamps set to `at`.
    #[must_use]
    pub fn create(fields: AnimalFields, at: Timestamp) -> Self {
        let mut merged = AnimalFields::template();
        merged.merge(fields);
        Self {
            fields: merged,
            created_at: at,
            updated_at: at,
        }
    }

    /// Merge `patch` into this record and refresh `updated_at`.
    ///
    /// Keys absent from `patch` are left untouched; `created_at` never changes.
    #[must_use]
    pub fn apply(mut self, patch: AnimalFields, at: Timestamp) -> Self {
        self.fields.merge(patch);
        self.updated_at = at;
        self
    }
}

/// A record together with the identifier it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredAnimal {
    pub id: AnimalId,
    #[serde(flatten)]
    pub animal: Animal,
}

/// Every animal, keyed by identifier, in insertion order.
pub type Collection = IndexMap<AnimalId, Animal>;
