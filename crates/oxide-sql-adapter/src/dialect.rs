//! The capability interface every dialect adapter implements.

use crate::config::AdapterConfig;
use crate::error::Result;
use crate::schema::{ChangeColumnOptions, Column, ColumnType, IndexDescriptor, IndexTarget};
use crate::value::{Row, SqlValue};
use crate::window::QueryWindow;

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    /// Rows returned by a read statement, after windowing.
    Rows(Vec<Row>),
    /// Rows affected by a write or DDL statement.
    Updated(u64),
}

impl ExecuteResult {
    /// Returns the rows, or nothing for a write.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Self::Rows(rows) => rows,
            Self::Updated(_) => Vec::new(),
        }
    }

    /// Returns the affected-row count of a write.
    #[must_use]
    pub const fn updated(&self) -> Option<u64> {
        match self {
            Self::Rows(_) => None,
            Self::Updated(count) => Some(*count),
        }
    }
}

/// Translates engine-neutral operations into one engine's SQL and types.
///
/// One adapter wraps one connection; calls must be serialized by the owner.
pub trait DialectAdapter {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the configuration the adapter was built with.
    fn config(&self) -> &AdapterConfig;

    /// Casts a driver value to the host value for a declared type.
    fn cast(&self, value: &SqlValue, column_type: &ColumnType) -> SqlValue;

    /// Renders a host value as a SQL literal.
    fn quote(&self, value: &SqlValue, column: Option<&Column>) -> String;

    /// Literal for boolean true.
    fn quoted_true(&self) -> &'static str {
        "TRUE"
    }

    /// Literal for boolean false.
    fn quoted_false(&self) -> &'static str {
        "FALSE"
    }

    /// Executes a statement, windowing the rows of a read.
    fn execute_windowed(
        &self,
        sql: &str,
        name: Option<&str>,
        window: QueryWindow,
    ) -> Result<ExecuteResult>;

    /// Executes a statement without a window.
    fn execute(&self, sql: &str, name: Option<&str>) -> Result<ExecuteResult> {
        self.execute_windowed(sql, name, QueryWindow::new())
    }

    /// Alias for [`execute_windowed`](Self::execute_windowed), keeping rows.
    fn select_all(&self, sql: &str, name: Option<&str>, window: QueryWindow) -> Result<Vec<Row>> {
        Ok(self.execute_windowed(sql, name, window)?.into_rows())
    }

    /// Returns the first row, limiting to one row unless a limit is set.
    fn select_one(&self, sql: &str, name: Option<&str>, window: QueryWindow) -> Result<Option<Row>> {
        let rows = self.select_all(sql, name, window.or_limit(1))?;
        Ok(rows.into_iter().next())
    }

    /// Returns the first column of the first row.
    fn select_value(&self, sql: &str, name: Option<&str>) -> Result<Option<SqlValue>> {
        Ok(self
            .select_one(sql, name, QueryWindow::new())?
            .and_then(Row::into_first_value))
    }

    /// Sets a column's default.
    fn change_column_default(&self, table: &str, column: &str, default: &SqlValue) -> Result<()>;

    /// Changes a column's type and/or nullability.
    fn change_column(
        &self,
        table: &str,
        column: &str,
        column_type: &ColumnType,
        options: &ChangeColumnOptions,
    ) -> Result<()>;

    /// Renames a table.
    fn rename_table(&self, name: &str, new_name: &str) -> Result<()>;

    /// Drops an index.
    fn remove_index(&self, table: &str, target: &IndexTarget) -> Result<()>;

    /// Drops a column.
    fn remove_column(&self, table: &str, column: &str) -> Result<()>;

    /// Renames a column.
    fn rename_column(&self, table: &str, column: &str, new_column: &str) -> Result<()>;

    /// Restarts an identity column after the current maximum.
    fn reset_sequence(&self, table: &str, column: &str) -> Result<()>;

    /// Restarts the identity column of a table's integer primary key.
    fn reset_pk_sequence(&self, table: &str) -> Result<()>;

    /// Returns the first primary-key column of a table.
    fn primary_key(&self, table: &str) -> Result<Option<String>> {
        Ok(self.primary_keys(table)?.into_iter().next())
    }

    /// Returns the primary-key columns of a table.
    fn primary_keys(&self, table: &str) -> Result<Vec<String>>;

    /// Returns the indexes of a table.
    ///
    /// The primary-key index may be included; callers filter it by name.
    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_result_accessors() {
        let rows = ExecuteResult::Rows(vec![Row::new().with("a", 1_i64)]);
        assert_eq!(rows.updated(), None);
        assert_eq!(rows.into_rows().len(), 1);

        let updated = ExecuteResult::Updated(3);
        assert_eq!(updated.updated(), Some(3));
        assert!(updated.into_rows().is_empty());
    }
}
