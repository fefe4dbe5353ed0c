//! Tag model for Docker Hub repositories

use crate::error::{PrunerError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Timestamp layout reported by the Hub tag API, e.g. `2024-04-01T08:15:30.123456Z`
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// A named, timestamped pointer to an image artifact within a repository.
///
/// Deserialized from the tag-listing API; the payload carries many more
/// fields (digest, images, sizes) that this tool does not use.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
    pub last_updated: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, last_updated: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_updated: last_updated.into(),
        }
    }

    /// Parse the registry-reported `last_updated` field into a comparable instant.
    pub fn parse_last_updated(&self) -> Result<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.last_updated, LAST_UPDATED_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| {
                PrunerError::Parse(format!(
                    "Invalid last_updated timestamp {:?} for tag '{}': {}",
                    self.last_updated, self.name, e
                ))
            })
    }
}
