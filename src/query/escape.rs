/// Wrap one identifier segment in backticks.
///
/// Every segment (table, alias, column) is escaped independently and
/// dot-joined by the caller, never as one combined string.
pub fn escape(identifier: &str) -> String {
    format!("`{identifier}`")
}
