use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Read(String),
    Parse(String),
    DuplicateEntity(String),
    UnknownReference { entity: String, association: String, reference: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Read(err) => write!(f, "failed to read schema: {err}"),
            SchemaError::Parse(err) => write!(f, "failed to parse schema: {err}"),
            SchemaError::DuplicateEntity(name) => write!(f, "entity '{name}' is defined twice"),
            SchemaError::UnknownReference { entity, association, reference } => write!(
                f,
                "association '{association}' of entity '{entity}' references unknown entity '{reference}'"
            ),
        }
    }
}

impl std::error::Error for SchemaError {}
