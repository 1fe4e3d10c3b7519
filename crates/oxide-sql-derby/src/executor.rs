//! Statement execution with client-side pagination.
//!
//! Derby releases before 10.5 have no `OFFSET`/`FETCH FIRST`, so reads run
//! in full and the [`QueryWindow`] is applied to the returned rows.

use std::sync::LazyLock;

use oxide_sql_adapter::{Connection, ExecuteResult, QueryWindow, Result};
use regex::Regex;
use tracing::debug;

static READ_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:select|show)").expect("valid read pattern"));

/// Returns true for statements that produce rows.
#[must_use]
pub fn is_read_statement(sql: &str) -> bool {
    READ_STATEMENT.is_match(sql)
}

/// Runs one statement on `connection`.
///
/// Reads return the windowed rows; anything else returns the affected-row
/// count. The window is consumed by the call.
pub fn execute<C: Connection + ?Sized>(
    connection: &C,
    sql: &str,
    name: Option<&str>,
    window: QueryWindow,
) -> Result<ExecuteResult> {
    debug!(sql = %sql, name = ?name, "Executing SQL");

    if is_read_statement(sql) {
        let rows = connection.execute_query(sql)?;
        let total = rows.len();
        let rows = window.apply(rows);
        debug!(total, returned = rows.len(), ?window, "Windowed result set");
        Ok(ExecuteResult::Rows(rows))
    } else {
        let count = connection.execute_update(sql)?;
        debug!(count, "Statement applied");
        Ok(ExecuteResult::Updated(count))
    }
}
