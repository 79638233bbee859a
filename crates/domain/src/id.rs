//! Animal identifiers and the formats used to generate them.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of an [`Animal`](crate::animal::Animal) inside the collection.
///
/// Identifiers are opaque strings: any string can be looked up, and
/// documents written by older deployments keep their legacy keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(String);

impl AnimalId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AnimalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AnimalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How new identifiers are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    /// Random UUID v4, hyphenated.
    #[default]
    Uuid,
    /// `ANI<unix millis>RD<0..=999>`, compatible with existing documents.
    ///
    /// Two creates within the same millisecond can produce the same value.
    Legacy,
}

impl IdFormat {
    /// Generate a new identifier in this format.
    #[must_use]
    pub fn generate(self) -> AnimalId {
        match self {
            Self::Uuid => AnimalId(uuid::Uuid::new_v4().to_string()),
            Self::Legacy => {
                let millis = crate::time::now().timestamp_millis();
                let suffix: u16 = rand::thread_rng().gen_range(0..1000);
                AnimalId(format!("ANI{millis}RD{suffix}"))
            }
        }
    }
}

/// Error returned when parsing an unknown [`IdFormat`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown id format {0:?}, expected \"uuid\" or \"legacy\"")]
pub struct UnknownIdFormat(pub String);

impl FromStr for IdFormat {
    type Err = UnknownIdFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "legacy" => Ok(Self::Legacy),
            _ => Err(UnknownIdFormat(s.to_string())),
        }
    }
}
