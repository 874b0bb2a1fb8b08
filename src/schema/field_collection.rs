use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::Field;

/// Ordered property-name -> field map of one entity definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCollection {
    pub fields: IndexMap<String, Field>,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, field: Field) -> Self {
        self.fields.insert(property.into(), field);
        self
    }

    pub fn has(&self, property: &str) -> bool {
        self.fields.contains_key(property)
    }

    pub fn get(&self, property: &str) -> Option<&Field> {
        self.fields.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    /// Translated subset as (property, storage column) pairs, in
    /// definition order.
    pub fn translated(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(property, field)| match field {
            Field::Translated { storage_name } => Some((property.as_str(), storage_name.as_str())),
            _ => None,
        })
    }
}
