use std::fmt;

/// Failures of path resolution and join building.
///
/// All of these are synchronous and non-recoverable: they indicate a
/// caller or schema bug, never a transient runtime condition. Callers
/// translate them into their own "invalid filter/sort field" responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Path segment does not correspond to any field of the entity.
    UnmappedField { field: String, entity: String },
    /// A field in association position carries no usable target
    /// definition.
    MissingReference { association: String, entity: String },
    /// No definition is registered under this entity name.
    UnknownEntity(String),
    /// Association recursion exceeded the depth limit; the schema
    /// contains a pathological self-referencing chain.
    DepthLimit { path: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnmappedField { field, entity } => {
                write!(f, "unmapped field '{field}' for definition '{entity}'")
            }
            ResolveError::MissingReference { association, entity } => {
                write!(f, "reference definition can not be detected for association '{association}' of '{entity}'")
            }
            ResolveError::UnknownEntity(entity) => {
                write!(f, "no definition registered for entity '{entity}'")
            }
            ResolveError::DepthLimit { path } => {
                write!(f, "association depth limit exceeded while resolving '{path}'")
            }
        }
    }
}

impl std::error::Error for ResolveError {}
