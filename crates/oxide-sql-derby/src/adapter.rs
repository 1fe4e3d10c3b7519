//! The Derby implementation of [`DialectAdapter`].

use oxide_sql_adapter::{
    AdapterConfig, AlterTableOp, ChangeColumnOptions, Column, ColumnType, Connection,
    DialectAdapter, DialectKind, ExecuteResult, IndexDescriptor, IndexTarget, OrmBridge,
    QueryWindow, Result, SqlValue, TableDefinition,
};
use tracing::{debug, info, warn};

use crate::cast::{cast, to_integer};
use crate::executor;
use crate::metadata;
use crate::quote::{quote_with, QUOTED_FALSE, QUOTED_TRUE};
use crate::rebuild::TableRebuild;
use crate::schema;

/// Derby dialect adapter over one connection.
///
/// # Example
///
/// ```rust,ignore
/// use oxide_sql_adapter::{AdapterConfig, DialectAdapter, DialectKind, QueryWindow};
/// use oxide_sql_derby::DerbyAdapter;
///
/// let adapter = DerbyAdapter::new(AdapterConfig::new(DialectKind::Derby), conn, orm);
///
/// // Rows 20..30, sliced client side.
/// let rows = adapter.select_all(
///     "SELECT * FROM posts ORDER BY id",
///     Some("Post Load"),
///     QueryWindow::new().limit(10).offset(20),
/// )?;
///
/// adapter.rename_column("posts", "title", "headline")?;
/// adapter.reset_pk_sequence("posts")?;
/// ```
#[derive(Debug)]
pub struct DerbyAdapter<C, O> {
    connection: C,
    orm: O,
    config: AdapterConfig,
}

impl<C: Connection, O: OrmBridge> DerbyAdapter<C, O> {
    /// Creates an adapter over `connection`, calling back into `orm`.
    pub const fn new(config: AdapterConfig, connection: C, orm: O) -> Self {
        Self {
            connection,
            orm,
            config,
        }
    }

    /// Returns the underlying connection.
    pub const fn connection(&self) -> &C {
        &self.connection
    }

    /// Returns the ORM bridge.
    pub const fn orm(&self) -> &O {
        &self.orm
    }

    /// Rebuilds a table through a staging copy with `op` applied.
    ///
    /// For ORM layers that implement [`OrmBridge::alter_table`] on top of
    /// this adapter. The identity sequence is restarted afterwards so new
    /// rows do not collide with copied keys.
    pub fn rebuild_table(&self, definition: &TableDefinition, op: &AlterTableOp) -> Result<()> {
        let plan = TableRebuild::plan(definition, op)?;
        info!(
            table = %plan.table,
            staging = %plan.staging,
            statements = plan.statements.len(),
            "Rebuilding table"
        );
        for sql in &plan.statements {
            self.execute(sql, Some("rebuild_table"))?;
        }
        if let Some(identity) = plan.identity_column() {
            self.reset_sequence(&plan.table, &identity.name)?;
        }
        Ok(())
    }

    /// Runs a DDL statement, falling back to the ORM's generic
    /// alter-table route when the engine lacks the syntax.
    fn execute_or_alter(&self, sql: &str, table: &str, fallback: &AlterTableOp) -> Result<()> {
        match self.execute(sql, None) {
            Ok(_) => Ok(()),
            Err(err) if err.is_unsupported_syntax() => {
                warn!(
                    sql = %sql,
                    table = %table,
                    error = %err,
                    "Statement unsupported, falling back to alter_table"
                );
                self.orm.alter_table(table, fallback)
            }
            Err(err) => Err(err),
        }
    }
}

impl<C: Connection, O: OrmBridge> DialectAdapter for DerbyAdapter<C, O> {
    fn name(&self) -> &'static str {
        DialectKind::Derby.name()
    }

    fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn cast(&self, value: &SqlValue, column_type: &ColumnType) -> SqlValue {
        cast(value, column_type, self.config.timezone)
    }

    fn quote(&self, value: &SqlValue, column: Option<&Column>) -> String {
        quote_with(value, column, |value, column| self.orm.quote(value, column))
    }

    fn quoted_true(&self) -> &'static str {
        QUOTED_TRUE
    }

    fn quoted_false(&self) -> &'static str {
        QUOTED_FALSE
    }

    fn execute_windowed(
        &self,
        sql: &str,
        name: Option<&str>,
        window: QueryWindow,
    ) -> Result<ExecuteResult> {
        executor::execute(&self.connection, sql, name, window)
    }

    fn change_column_default(&self, table: &str, column: &str, default: &SqlValue) -> Result<()> {
        let quoted = self.quote(default, None);
        self.execute(&schema::set_default_sql(table, column, &quoted), None)?;
        Ok(())
    }

    fn change_column(
        &self,
        table: &str,
        column: &str,
        column_type: &ColumnType,
        options: &ChangeColumnOptions,
    ) -> Result<()> {
        if *column_type == ColumnType::String {
            let type_sql = self.orm.type_to_sql(column_type, options.limit);
            self.execute(&schema::set_data_type_sql(table, column, &type_sql), None)?;
        } else {
            debug!(
                table = %table,
                column = %column,
                column_type = %column_type,
                "Derby only widens VARCHAR, leaving type unchanged"
            );
        }

        if let Some(nullable) = options.null {
            self.execute(&schema::set_nullable_sql(table, column, nullable), None)?;
        }
        Ok(())
    }

    fn rename_table(&self, name: &str, new_name: &str) -> Result<()> {
        self.execute(&schema::rename_table_sql(name, new_name), None)?;
        Ok(())
    }

    fn remove_index(&self, table: &str, target: &IndexTarget) -> Result<()> {
        let index = self.orm.index_name(table, target);
        self.execute(&schema::drop_index_sql(&index), None)?;
        Ok(())
    }

    fn remove_column(&self, table: &str, column: &str) -> Result<()> {
        self.execute_or_alter(
            &schema::drop_column_sql(table, column),
            table,
            &AlterTableOp::DropColumn(column.to_string()),
        )
    }

    fn rename_column(&self, table: &str, column: &str, new_column: &str) -> Result<()> {
        self.execute_or_alter(
            &schema::rename_column_sql(table, column, new_column),
            table,
            &AlterTableOp::rename(column, new_column),
        )
    }

    fn reset_sequence(&self, table: &str, column: &str) -> Result<()> {
        let max = self
            .select_value(&schema::max_value_sql(table, column), None)?
            .map_or(0, |value| to_integer(&value));
        let next = max.saturating_add(1);
        info!(table = %table, column = %column, next, "Restarting identity column");
        self.execute(&schema::restart_identity_sql(table, column, next), None)?;
        Ok(())
    }

    fn reset_pk_sequence(&self, table: &str) -> Result<()> {
        let Some(model) = self.orm.classes_for_table(table).into_iter().next() else {
            debug!(table = %table, "No model for table, sequence left alone");
            return Ok(());
        };
        let Some(pk) = model.primary_key.as_deref() else {
            return Ok(());
        };
        let integer_key = model
            .columns_hash
            .get(pk)
            .is_some_and(|c| c.column_type == ColumnType::Integer);
        if integer_key {
            self.reset_sequence(&model.table_name, pk)?;
        }
        Ok(())
    }

    fn primary_keys(&self, table: &str) -> Result<Vec<String>> {
        metadata::primary_keys(&self.connection, table)
    }

    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        metadata::indexes(&self.connection, table)
    }
}
