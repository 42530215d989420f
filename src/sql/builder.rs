//! Builds parameterized SELECT statements. Identifiers come from constants only; values are always placeholders.

use crate::error::AppError;
use crate::sql::{BindValue, Pagination};

const ALL_COLUMNS: &str = "*";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Equality conditions joined with AND, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    conditions: Vec<(&'static str, BindValue)>,
}

impl Filter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<BindValue>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render `col = $n AND ...`, registering each value on `q` in order.
    fn render(&self, q: &mut QueryBuf) -> String {
        self.conditions
            .iter()
            .map(|(col, val)| {
                let n = q.push_param(val.clone());
                format!("{} = ${}", col, n)
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

pub struct SelectQuery<'a> {
    pub table: &'a str,
    /// Empty means `*`.
    pub columns: &'a [&'a str],
    pub filter: &'a Filter,
    pub page: &'a str,
}

/// `SELECT <cols> FROM <table> [WHERE <filter>] LIMIT <limit> [OFFSET <offset>]`.
/// OFFSET is emitted only when positive. Same input, same statement text.
pub fn select(input: &SelectQuery<'_>) -> Result<QueryBuf, AppError> {
    if input.table.is_empty() {
        return Err(AppError::Query("table name is empty".into()));
    }
    let mut q = QueryBuf::new();
    let cols = if input.columns.is_empty() {
        ALL_COLUMNS.to_string()
    } else {
        input.columns.join(", ")
    };
    let where_clause = if input.filter.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", input.filter.render(&mut q))
    };
    let page = Pagination::from_page_token(input.page);
    let offset_clause = if page.offset > 0 {
        format!(" OFFSET {}", page.offset)
    } else {
        String::new()
    };
    q.sql = format!(
        "SELECT {} FROM {}{} LIMIT {}{}",
        cols, input.table, where_clause, page.limit, offset_clause
    );
    Ok(q)
}
