use serde::{Deserialize, Serialize};

use crate::schema::FieldCollection;

/// Static description of one logical record type: the physical table
/// name plus the fields reachable on it. Defined once at startup,
/// immutable thereafter, shared read-only across all query builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Stable entity name; doubles as the physical table name.
    pub name: String,
    #[serde(default)]
    pub fields: FieldCollection,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>, fields: FieldCollection) -> Self {
        Self { name: name.into(), fields }
    }

    /// Satellite table holding the translated columns of this entity.
    pub fn translation_table(&self) -> String {
        format!("{}_translation", self.name)
    }
}
