pub mod field;
pub use field::*;

pub mod field_collection;
pub use field_collection::*;

pub mod entity_definition;
pub use entity_definition::*;

pub mod schema_error;
pub use schema_error::*;

pub mod registry;
pub use registry::*;
