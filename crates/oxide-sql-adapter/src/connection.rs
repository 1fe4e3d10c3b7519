//! Collaborators an adapter consumes but never implements.
//!
//! A [`Connection`] is the driver-level handle that runs raw SQL. An
//! [`OrmBridge`] is the ORM/migration layer sitting above the adapter, which
//! the adapter calls back into for generic behaviour.

use crate::error::Result;
use crate::schema::{
    AlterTableOp, Column, ColumnType, IndexDescriptor, IndexTarget, ModelDescriptor,
};
use crate::value::{Row, SqlValue};

/// Driver-level connection.
///
/// Implementations report statements the engine cannot parse as
/// [`AdapterError::UnsupportedSyntax`](crate::AdapterError::UnsupportedSyntax)
/// and everything else as [`AdapterError::Driver`](crate::AdapterError::Driver).
pub trait Connection {
    /// Runs a query and returns every row, in order.
    fn execute_query(&self, sql: &str) -> Result<Vec<Row>>;

    /// Runs a write or DDL statement and returns the affected-row count.
    fn execute_update(&self, sql: &str) -> Result<u64>;

    /// Returns the primary-key columns of a table.
    fn primary_keys(&self, table: &str) -> Result<Vec<String>>;

    /// Returns the indexes of a table.
    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>>;
}

impl<T: Connection + ?Sized> Connection for &T {
    fn execute_query(&self, sql: &str) -> Result<Vec<Row>> {
        (**self).execute_query(sql)
    }

    fn execute_update(&self, sql: &str) -> Result<u64> {
        (**self).execute_update(sql)
    }

    fn primary_keys(&self, table: &str) -> Result<Vec<String>> {
        (**self).primary_keys(table)
    }

    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        (**self).indexes(table)
    }
}

/// Hooks into the ORM/migration layer.
pub trait OrmBridge {
    /// Generic quoting for values a dialect does not special-case.
    fn quote(&self, value: &SqlValue, _column: Option<&Column>) -> String {
        value.to_sql_inline()
    }

    /// Generic column alteration, used when the engine lacks direct syntax.
    fn alter_table(&self, table: &str, op: &AlterTableOp) -> Result<()>;

    /// Model classes mapped to a table, most specific first.
    fn classes_for_table(&self, table: &str) -> Vec<ModelDescriptor>;

    /// Derives the name of an index.
    ///
    /// Explicit names pass through; column targets follow the
    /// `index_<table>_on_<col>_and_<col>` convention.
    fn index_name(&self, table: &str, target: &IndexTarget) -> String {
        match target {
            IndexTarget::Name(name) => name.clone(),
            IndexTarget::Columns(columns) => {
                format!("index_{table}_on_{}", columns.join("_and_"))
            }
        }
    }

    /// Renders a logical type as dialect SQL.
    fn type_to_sql(&self, column_type: &ColumnType, limit: Option<u32>) -> String;
}

impl<T: OrmBridge + ?Sized> OrmBridge for &T {
    fn quote(&self, value: &SqlValue, column: Option<&Column>) -> String {
        (**self).quote(value, column)
    }

    fn alter_table(&self, table: &str, op: &AlterTableOp) -> Result<()> {
        (**self).alter_table(table, op)
    }

    fn classes_for_table(&self, table: &str) -> Vec<ModelDescriptor> {
        (**self).classes_for_table(table)
    }

    fn index_name(&self, table: &str, target: &IndexTarget) -> String {
        (**self).index_name(table, target)
    }

    fn type_to_sql(&self, column_type: &ColumnType, limit: Option<u32>) -> String {
        (**self).type_to_sql(column_type, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl OrmBridge for Bare {
        fn alter_table(&self, _table: &str, _op: &AlterTableOp) -> Result<()> {
            Ok(())
        }

        fn classes_for_table(&self, _table: &str) -> Vec<ModelDescriptor> {
            Vec::new()
        }

        fn type_to_sql(&self, column_type: &ColumnType, _limit: Option<u32>) -> String {
            column_type.to_string()
        }
    }

    #[test]
    fn test_index_name_convention() {
        let orm = Bare;
        assert_eq!(
            orm.index_name("users", &IndexTarget::column("email")),
            "index_users_on_email"
        );
        assert_eq!(
            orm.index_name(
                "users",
                &IndexTarget::Columns(vec!["first".to_string(), "last".to_string()])
            ),
            "index_users_on_first_and_last"
        );
        assert_eq!(
            orm.index_name("users", &IndexTarget::Name("by_mail".to_string())),
            "by_mail"
        );
    }

    #[test]
    fn test_default_quote_is_generic() {
        assert_eq!(Bare.quote(&SqlValue::Int(3), None), "3");
        assert_eq!(Bare.quote(&SqlValue::Null, None), "NULL");
    }
}
