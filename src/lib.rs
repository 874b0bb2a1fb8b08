pub mod schema;
pub use schema::{DefinitionProvider, EntityDefinition, Field, FieldCollection, SchemaError, SchemaRegistry};

pub mod query;
pub use query::{
    FieldResolver, HAS_TO_MANY_JOIN, JoinBuilder, JoinClause, MAX_JOIN_DEPTH, ParamValue,
    QueryBuilder, ResolveError, SqlQuery, TranslationContext, TranslationSelector, escape,
};
