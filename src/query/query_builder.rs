use uuid::Uuid;

/// Value bound under a named query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Uuid(Uuid),
    String(String),
    Int(i64),
    Bool(bool),
}

/// Minimal surface the resolution layer requires from the underlying
/// SQL builder: join and select emission, opaque state flags for
/// idempotence checks, and named parameter binds.
///
/// State flags and bind names are per query build; nothing here is
/// shared between builds.
pub trait QueryBuilder {
    /// Append a left join of `table` aliased `alias`, attached to
    /// `from_alias`, with the given ON condition. Identifiers arrive
    /// pre-escaped.
    fn left_join(&mut self, from_alias: &str, table: &str, alias: &str, condition: &str);

    fn add_select(&mut self, expr: &str);

    fn has_state(&self, state: &str) -> bool;

    fn add_state(&mut self, state: &str);

    fn bind(&mut self, name: &str, value: ParamValue);
}
