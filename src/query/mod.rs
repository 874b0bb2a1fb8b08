pub mod escape;
pub use escape::*;

pub mod query_builder;
pub use query_builder::*;

pub mod sql_query;
pub use sql_query::*;

pub mod translation_context;
pub use translation_context::*;

pub mod resolve_error;
pub use resolve_error::*;

pub mod field_resolver;
pub use field_resolver::*;

pub mod join_builder;
pub use join_builder::*;

pub mod translation_selector;
pub use translation_selector::*;
