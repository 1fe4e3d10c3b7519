//! Schema representation types.
//!
//! These describe tables and columns the way the ORM layer sees them. An
//! adapter only ever reads a column's declared [`ColumnType`]; the richer
//! [`TableDefinition`] exists for the in-memory alter-table fallback.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};

/// Logical column types understood by the ORM layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Identity column generated by the engine.
    PrimaryKey,
    /// Bounded character string.
    String,
    /// Unbounded character data.
    Text,
    /// Integer.
    Integer,
    /// Floating point.
    Float,
    /// Exact numeric.
    Decimal,
    /// Date and time, reduced to a date when the time is midnight.
    Datetime,
    /// Full timestamp.
    Timestamp,
    /// Time of day.
    Time,
    /// Calendar date.
    Date,
    /// Binary data.
    Binary,
    /// Boolean.
    Boolean,
    /// Any other engine-specific type, carried by name.
    Other(String),
}

impl ColumnType {
    /// Returns the ORM-level name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table column as declared by the ORM layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared logical type.
    pub column_type: ColumnType,
    /// Declared limit or precision.
    pub limit: Option<u32>,
    /// Whether the column allows NULL values.
    pub nullable: bool,
    /// Default value, already rendered as SQL.
    pub default: Option<String>,
}

impl Column {
    /// Creates a nullable column without limit or default.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            limit: None,
            nullable: true,
            default: None,
        }
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value SQL.
    #[must_use]
    pub fn default(mut self, sql: impl Into<String>) -> Self {
        self.default = Some(sql.into());
        self
    }
}

/// Index metadata reported by a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Table the index belongs to.
    pub table: String,
    /// Index name.
    pub name: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
}

/// What a caller knows about an index it wants to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// The index's explicit name.
    Name(String),
    /// The indexed columns; the name is derived by convention.
    Columns(Vec<String>),
}

impl IndexTarget {
    /// Targets the conventional index over a single column.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Columns(vec![name.into()])
    }
}

/// A model class registered with the ORM for some table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Table the model maps to.
    pub table_name: String,
    /// Primary-key column, if the model has one.
    pub primary_key: Option<String>,
    /// Declared columns by name.
    pub columns_hash: HashMap<String, Column>,
}

impl ModelDescriptor {
    /// Creates a descriptor with no columns.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Sets the primary-key column name.
    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns_hash.insert(column.name.clone(), column);
        self
    }
}

/// Options accepted when changing a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeColumnOptions {
    /// New limit for the type.
    pub limit: Option<u32>,
    /// New nullability; `None` leaves it untouched.
    pub null: Option<bool>,
}

impl ChangeColumnOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the nullability.
    #[must_use]
    pub const fn null(mut self, nullable: bool) -> Self {
        self.null = Some(nullable);
        self
    }
}

/// A column change the engine could not express directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableOp {
    /// Remove the named column.
    DropColumn(String),
    /// Rename columns, as `(old, new)` pairs.
    RenameColumns(Vec<(String, String)>),
}

impl AlterTableOp {
    /// A single-column rename.
    #[must_use]
    pub fn rename(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::RenameColumns(vec![(old.into(), new.into())])
    }

    /// Maps a column name in the altered table back to its current name.
    #[must_use]
    pub fn source_name<'a>(&'a self, altered: &'a str) -> &'a str {
        match self {
            Self::DropColumn(_) => altered,
            Self::RenameColumns(pairs) => pairs
                .iter()
                .find(|(_, new)| new == altered)
                .map_or(altered, |(old, _)| old.as_str()),
        }
    }

    fn renamed<'a>(&'a self, current: &'a str) -> &'a str {
        match self {
            Self::DropColumn(_) => current,
            Self::RenameColumns(pairs) => pairs
                .iter()
                .find(|(old, _)| old == current)
                .map_or(current, |(_, new)| new.as_str()),
        }
    }
}

/// In-memory definition of a table, used to rebuild it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Column definitions, in order.
    pub columns: Vec<Column>,
    /// Primary-key column, if any.
    pub primary_key: Option<String>,
    /// Secondary indexes.
    pub indexes: Vec<IndexDescriptor>,
}

impl TableDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
        }
    }

    /// Adds a column. Identity columns become the primary key.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        if column.column_type == ColumnType::PrimaryKey && self.primary_key.is_none() {
            self.primary_key = Some(column.name.clone());
        }
        self.columns.push(column);
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns a copy of this definition with `op` applied.
    ///
    /// Indexes over a dropped column are dropped with it. A rename onto a
    /// name another column keeps is rejected.
    pub fn altered(&self, op: &AlterTableOp) -> Result<Self> {
        let mut altered = self.clone();
        match op {
            AlterTableOp::DropColumn(column) => {
                let position = self.position(column)?;
                altered.columns.remove(position);
                if altered.primary_key.as_deref() == Some(column.as_str()) {
                    altered.primary_key = None;
                }
                altered
                    .indexes
                    .retain(|index| !index.columns.iter().any(|c| c == column));
            }
            AlterTableOp::RenameColumns(pairs) => {
                for (old, _) in pairs {
                    self.position(old)?;
                }
                for column in &mut altered.columns {
                    column.name = op.renamed(&column.name).to_string();
                }
                for (i, column) in altered.columns.iter().enumerate() {
                    if altered.columns[..i].iter().any(|c| c.name == column.name) {
                        return Err(AdapterError::DuplicateColumn {
                            table: self.name.clone(),
                            column: column.name.clone(),
                        });
                    }
                }
                altered.primary_key = altered
                    .primary_key
                    .map(|pk| op.renamed(&pk).to_string());
                for index in &mut altered.indexes {
                    for column in &mut index.columns {
                        *column = op.renamed(column).to_string();
                    }
                }
            }
        }
        Ok(altered)
    }

    fn position(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| AdapterError::UnknownColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }
}
