//! Minimal SQL query builder handed to filter callbacks.

use rusqlite::types::Value;

/// Wraps an identifier in double quotes, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Comparison operators usable in generated conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
        }
    }
}

/// A `SELECT` over one table with AND-ed conditions.
///
/// Conditions use anonymous `?` placeholders; parameters are kept in the
/// order the conditions were added.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    table: String,
    conditions: Vec<String>,
    params: Vec<Value>,
    order_by: Vec<String>,
    limit: Option<u64>,
}

impl QueryContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            conditions: Vec::new(),
            params: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Adds a raw SQL condition with its `?` parameters.
    pub fn and_where<I>(mut self, clause: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.conditions.push(format!("({})", clause.into()));
        self.params.extend(params);
        self
    }

    /// `column <op> value`
    pub fn and_compare(self, column: &str, op: Comparison, value: impl Into<Value>) -> Self {
        let clause = format!("{} {} ?", quote_identifier(column), op.as_sql());
        self.and_where(clause, [value.into()])
    }

    /// `column = value`
    pub fn and_where_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_compare(column, Comparison::Eq, value)
    }

    pub fn order_by(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "DESC" } else { "ASC" };
        self.order_by
            .push(format!("{} {}", quote_identifier(column), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the statement with the given select list.
    pub fn to_sql(&self, select: &str) -> String {
        let mut sql = format!("SELECT {} FROM {}", select, quote_identifier(&self.table));
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}
