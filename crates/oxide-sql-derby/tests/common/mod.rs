#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use oxide_sql_adapter::{
    AdapterConfig, AdapterError, AlterTableOp, ColumnType, Connection, DialectKind,
    IndexDescriptor, ModelDescriptor, OrmBridge, Result, Row,
};
use oxide_sql_derby::DerbyAdapter;
use tracing_subscriber::filter::LevelFilter;

/// Installs a test-writer subscriber so adapter logs show up on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// In-memory connection that records every statement it is given.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    statements: RefCell<Vec<String>>,
    key_lookups: RefCell<Vec<String>>,
    results: HashMap<String, Vec<Row>>,
    rejected: Vec<String>,
    failing: Vec<String>,
    update_count: u64,
    primary_keys: HashMap<String, Vec<String>>,
    indexes: HashMap<String, Vec<IndexDescriptor>>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned for exactly this query.
    pub fn with_rows(mut self, sql: &str, rows: Vec<Row>) -> Self {
        self.results.insert(sql.to_string(), rows);
        self
    }

    /// Statements containing `fragment` fail as unsupported syntax.
    pub fn rejecting(mut self, fragment: &str) -> Self {
        self.rejected.push(fragment.to_string());
        self
    }

    /// Statements containing `fragment` fail with a driver error.
    pub fn failing(mut self, fragment: &str) -> Self {
        self.failing.push(fragment.to_string());
        self
    }

    pub fn with_update_count(mut self, count: u64) -> Self {
        self.update_count = count;
        self
    }

    pub fn with_primary_keys(mut self, table: &str, keys: &[&str]) -> Self {
        self.primary_keys.insert(
            table.to_string(),
            keys.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn with_indexes(mut self, table: &str, indexes: Vec<IndexDescriptor>) -> Self {
        self.indexes.insert(table.to_string(), indexes);
        self
    }

    /// Every statement seen so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    /// Table names passed to `primary_keys`.
    pub fn key_lookups(&self) -> Vec<String> {
        self.key_lookups.borrow().clone()
    }

    fn record(&self, sql: &str) -> Result<()> {
        self.statements.borrow_mut().push(sql.to_string());
        if self.rejected.iter().any(|f| sql.contains(f.as_str())) {
            return Err(AdapterError::unsupported_syntax(
                sql,
                "Syntax error: Encountered \"COLUMN\" at line 1",
            ));
        }
        if self.failing.iter().any(|f| sql.contains(f.as_str())) {
            return Err(AdapterError::driver("Connection refused"));
        }
        Ok(())
    }
}

impl Connection for RecordingConnection {
    fn execute_query(&self, sql: &str) -> Result<Vec<Row>> {
        self.record(sql)?;
        Ok(self.results.get(sql).cloned().unwrap_or_default())
    }

    fn execute_update(&self, sql: &str) -> Result<u64> {
        self.record(sql)?;
        Ok(self.update_count)
    }

    fn primary_keys(&self, table: &str) -> Result<Vec<String>> {
        self.key_lookups.borrow_mut().push(table.to_string());
        Ok(self.primary_keys.get(table).cloned().unwrap_or_default())
    }

    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        Ok(self.indexes.get(table).cloned().unwrap_or_default())
    }
}

/// ORM bridge that records generic alter-table requests.
#[derive(Debug, Default)]
pub struct RecordingOrm {
    models: Vec<ModelDescriptor>,
    altered: RefCell<Vec<(String, AlterTableOp)>>,
}

impl RecordingOrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: ModelDescriptor) -> Self {
        self.models.push(model);
        self
    }

    pub fn altered(&self) -> Vec<(String, AlterTableOp)> {
        self.altered.borrow().clone()
    }
}

impl OrmBridge for RecordingOrm {
    fn alter_table(&self, table: &str, op: &AlterTableOp) -> Result<()> {
        self.altered
            .borrow_mut()
            .push((table.to_string(), op.clone()));
        Ok(())
    }

    fn classes_for_table(&self, table: &str) -> Vec<ModelDescriptor> {
        self.models
            .iter()
            .filter(|m| m.table_name == table)
            .cloned()
            .collect()
    }

    fn type_to_sql(&self, column_type: &ColumnType, limit: Option<u32>) -> String {
        oxide_sql_derby::types::type_to_sql(column_type, limit)
    }
}

/// Adapter borrowing the given collaborators, with UTC timestamps.
pub fn adapter<'a>(
    connection: &'a RecordingConnection,
    orm: &'a RecordingOrm,
) -> DerbyAdapter<&'a RecordingConnection, &'a RecordingOrm> {
    init_tracing();
    DerbyAdapter::new(AdapterConfig::new(DialectKind::Derby), connection, orm)
}

/// `count` rows with an `ID` column numbered from 0.
pub fn numbered_rows(count: i64) -> Vec<Row> {
    (0..count).map(|n| Row::new().with("ID", n)).collect()
}

/// The `ID` values of `rows`, in order.
pub fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| match row.get("ID") {
            Some(oxide_sql_adapter::SqlValue::Int(n)) => Some(*n),
            _ => None,
        })
        .collect()
}
