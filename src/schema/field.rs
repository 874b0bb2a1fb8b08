use serde::{Deserialize, Serialize};

/// One named attribute or association of an entity definition.
///
/// The variant tag carries the association kind explicitly, so resolution
/// code dispatches via pattern matching instead of runtime type checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Field {
    /// Plain column stored on the entity table itself.
    Storage { storage_name: String },
    /// Column stored on the `<entity>_translation` satellite table,
    /// keyed by entity id + locale id.
    Translated { storage_name: String },
    /// Foreign key on this table pointing at one row of `reference`.
    ManyToOne {
        reference: String,
        storage_name: String,
        reference_field: String,
    },
    /// Rows of `reference` pointing back at this table. Joining widens
    /// the row count.
    OneToMany {
        reference: String,
        local_field: String,
        reference_field: String,
    },
    /// Relation through a bridge entity carrying two foreign keys.
    ManyToMany {
        mapping: String,
        reference: String,
        mapping_local_column: String,
        mapping_reference_column: String,
    },
}

impl Field {
    /// Storage column for leaf resolution. Many-to-one associations are
    /// storage aware (the local FK column); to-many associations carry
    /// no storage column and are never valid leaves.
    pub fn storage_name(&self) -> Option<&str> {
        match self {
            Field::Storage { storage_name }
            | Field::Translated { storage_name }
            | Field::ManyToOne { storage_name, .. } => Some(storage_name),
            Field::OneToMany { .. } | Field::ManyToMany { .. } => None,
        }
    }

    /// Target entity of an association. For many-to-many this is the
    /// target, not the bridge.
    pub fn reference_entity(&self) -> Option<&str> {
        match self {
            Field::ManyToOne { reference, .. }
            | Field::OneToMany { reference, .. }
            | Field::ManyToMany { reference, .. } => Some(reference),
            Field::Storage { .. } | Field::Translated { .. } => None,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, Field::Translated { .. })
    }

    pub fn is_to_many(&self) -> bool {
        matches!(self, Field::OneToMany { .. } | Field::ManyToMany { .. })
    }
}
