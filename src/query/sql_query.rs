use indexmap::{IndexMap, IndexSet};

use crate::query::{ParamValue, QueryBuilder};

/// One recorded left join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub from_alias: String,
    pub table: String,
    pub alias: String,
    pub condition: String,
}

/// Default `QueryBuilder` implementation: records joins, selects,
/// state flags and parameter binds in emission order.
///
/// Owned by exactly one query under construction; concurrent builds
/// each own their own instance. Also serves as the test double for the
/// resolution layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlQuery {
    pub joins: Vec<JoinClause>,
    pub selects: Vec<String>,
    pub states: IndexSet<String>,
    pub params: IndexMap<String, ParamValue>,
}

impl SqlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the recorded joins as SQL text, one clause per line, in
    /// emission order.
    pub fn join_sql(&self) -> String {
        self.joins
            .iter()
            .map(|join| format!("LEFT JOIN {} {} ON {}", join.table, join.alias, join.condition))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl QueryBuilder for SqlQuery {
    fn left_join(&mut self, from_alias: &str, table: &str, alias: &str, condition: &str) {
        self.joins.push(JoinClause {
            from_alias: from_alias.to_string(),
            table: table.to_string(),
            alias: alias.to_string(),
            condition: condition.to_string(),
        });
    }

    fn add_select(&mut self, expr: &str) {
        self.selects.push(expr.to_string());
    }

    fn has_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    fn add_state(&mut self, state: &str) {
        self.states.insert(state.to_string());
    }

    fn bind(&mut self, name: &str, value: ParamValue) {
        self.params.insert(name.to_string(), value);
    }
}
