use std::path::Path;

use indexmap::IndexMap;

use crate::schema::{EntityDefinition, Field, SchemaError};

/// Definition lookup seam consumed by the resolver and join builder.
/// `SchemaRegistry` is the canonical implementation; tests may
/// substitute their own.
pub trait DefinitionProvider {
    fn definition_of(&self, entity: &str) -> Option<&EntityDefinition>;
}

/// Define-once, read-everywhere collection of entity definitions.
///
/// A registry is built at startup (programmatically or from a JSON
/// document) and shared read-only across any number of concurrent
/// query builds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    definitions: IndexMap<String, EntityDefinition>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its entity name.
    pub fn define(&mut self, definition: EntityDefinition) -> Result<(), SchemaError> {
        if self.definitions.contains_key(&definition.name) {
            return Err(SchemaError::DuplicateEntity(definition.name));
        }
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, entity: &str) -> Option<&EntityDefinition> {
        self.definitions.get(entity)
    }

    /// Parse a registry from a JSON array of entity definitions and
    /// validate it.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let definitions: Vec<EntityDefinition> =
            serde_json::from_str(json).map_err(|err| SchemaError::Parse(err.to_string()))?;

        let mut registry = Self::new();
        for definition in definitions {
            registry.define(definition)?;
        }
        registry.validate()?;

        Ok(registry)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path).map_err(|err| SchemaError::Read(err.to_string()))?;
        Self::from_json_str(&json)
    }

    /// Check that every association (including many-to-many bridges)
    /// points at a defined entity. A dangling reference is a schema
    /// bug, not a runtime condition.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (entity, definition) in &self.definitions {
            for (association, field) in definition.fields.iter() {
                let mut references: Vec<&str> = Vec::new();
                if let Some(reference) = field.reference_entity() {
                    references.push(reference);
                }
                if let Field::ManyToMany { mapping, .. } = field {
                    references.push(mapping);
                }

                for reference in references {
                    if !self.definitions.contains_key(reference) {
                        return Err(SchemaError::UnknownReference {
                            entity: entity.clone(),
                            association: association.clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl DefinitionProvider for SchemaRegistry {
    fn definition_of(&self, entity: &str) -> Option<&EntityDefinition> {
        self.definitions.get(entity)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::schema::FieldCollection;

    const CATALOG_JSON: &str = r#"[
        {
            "name": "product",
            "fields": {
                "active": { "kind": "storage", "storage_name": "active" },
                "name": { "kind": "translated", "storage_name": "name" },
                "categories": {
                    "kind": "many-to-many",
                    "mapping": "product_category",
                    "reference": "category",
                    "mapping_local_column": "product_id",
                    "mapping_reference_column": "category_id"
                }
            }
        },
        {
            "name": "product_category",
            "fields": {
                "product_id": { "kind": "storage", "storage_name": "product_id" },
                "category_id": { "kind": "storage", "storage_name": "category_id" }
            }
        },
        {
            "name": "category",
            "fields": {
                "name": { "kind": "translated", "storage_name": "name" }
            }
        }
    ]"#;

    #[test]
    fn define_then_get() {
        let mut registry = SchemaRegistry::new();
        registry.define(EntityDefinition::new("product", FieldCollection::new())).unwrap();

        assert!(registry.get("product").is_some());
        assert!(registry.get("category").is_none());
    }

    #[test]
    fn defining_the_same_entity_twice_is_an_error() {
        let mut registry = SchemaRegistry::new();
        registry.define(EntityDefinition::new("product", FieldCollection::new())).unwrap();

        let err = registry.define(EntityDefinition::new("product", FieldCollection::new())).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateEntity("product".into()));
    }

    #[test]
    fn loads_a_registry_from_json() {
        let registry = SchemaRegistry::from_json_str(CATALOG_JSON).unwrap();

        let product = registry.get("product").unwrap();
        assert!(product.fields.has("categories"));
        assert_eq!(
            product.fields.get("categories").unwrap().reference_entity(),
            Some("category")
        );
        assert_eq!(registry.get("category").unwrap().translation_table(), "category_translation");
    }

    #[test]
    fn loads_a_registry_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();

        let registry = SchemaRegistry::from_json_file(&path).unwrap();
        assert!(registry.get("product_category").is_some());
    }

    #[test]
    fn validate_rejects_dangling_references() {
        let mut registry = SchemaRegistry::new();
        registry
            .define(EntityDefinition::new(
                "product",
                FieldCollection::new().with("manufacturer", Field::ManyToOne {
                    reference: "manufacturer".into(),
                    storage_name: "manufacturer_id".into(),
                    reference_field: "id".into(),
                }),
            ))
            .unwrap();

        let err = registry.validate().unwrap_err();
        assert_eq!(err, SchemaError::UnknownReference {
            entity: "product".into(),
            association: "manufacturer".into(),
            reference: "manufacturer".into(),
        });
    }

    #[test]
    fn validate_checks_the_many_to_many_bridge_too() {
        let mut registry = SchemaRegistry::new();
        registry
            .define(EntityDefinition::new(
                "product",
                FieldCollection::new().with("categories", Field::ManyToMany {
                    mapping: "product_category".into(),
                    reference: "category".into(),
                    mapping_local_column: "product_id".into(),
                    mapping_reference_column: "category_id".into(),
                }),
            ))
            .unwrap();
        registry.define(EntityDefinition::new("category", FieldCollection::new())).unwrap();

        let err = registry.validate().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownReference { reference, .. } if reference == "product_category"));
    }
}
