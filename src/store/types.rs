//! Item record and the request schemas that feed the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned item identifier.
pub type ItemId = u64;

/// The managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique for the lifetime of the store, never reused.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description, empty when not supplied.
    pub description: String,
}

/// Body of a create request.
///
/// Both fields are optional at the schema level so a missing `name` reaches
/// the store and is rejected there with a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewItem {
    /// Required, must be non-empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Defaults to an empty string.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    /// Create a request with a name and optional description.
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            description: description.map(str::to_string),
        }
    }
}

/// Body of an update request. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ItemPatch {
    /// Replacement name. An empty string is accepted.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemPatch {
    /// Patch that only replaces the name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Patch that only replaces the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: Some(description.into()),
        }
    }
}
