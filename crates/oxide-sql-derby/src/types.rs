//! Derby native column types.

use oxide_sql_adapter::ColumnType;

/// Identity column definition used for `primary_key` columns.
pub const IDENTITY_PRIMARY_KEY: &str = "int generated by default as identity NOT NULL PRIMARY KEY";

/// A native type name and its default limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeType {
    /// SQL type name.
    pub name: &'static str,
    /// Limit applied when the caller gives none.
    pub limit: Option<u32>,
    /// Whether the type accepts a `(limit)` suffix at all.
    pub accepts_limit: bool,
}

impl NativeType {
    const fn bare(name: &'static str) -> Self {
        Self {
            name,
            limit: None,
            accepts_limit: false,
        }
    }

    const fn sized(name: &'static str, limit: Option<u32>) -> Self {
        Self {
            name,
            limit,
            accepts_limit: true,
        }
    }
}

/// Returns Derby's native type for a logical type.
///
/// Integers carry no limit: Derby rejects `integer(n)`.
#[must_use]
pub fn native_type(column_type: &ColumnType) -> NativeType {
    match column_type {
        ColumnType::PrimaryKey => NativeType::bare(IDENTITY_PRIMARY_KEY),
        ColumnType::String => NativeType::sized("varchar", Some(255)),
        ColumnType::Text => NativeType::bare("clob"),
        ColumnType::Integer => NativeType::bare("integer"),
        ColumnType::Float => NativeType::bare("float"),
        ColumnType::Decimal => NativeType::sized("decimal", None),
        ColumnType::Datetime | ColumnType::Timestamp => NativeType::bare("timestamp"),
        ColumnType::Time => NativeType::bare("time"),
        ColumnType::Date => NativeType::bare("date"),
        ColumnType::Binary => NativeType::sized("blob", None),
        ColumnType::Boolean => NativeType::bare("smallint"),
        ColumnType::Other(_) => NativeType::bare(""),
    }
}

/// Renders a logical type, with `limit` overriding the native default.
///
/// Types Derby does not know natively are rendered by their own name.
#[must_use]
pub fn type_to_sql(column_type: &ColumnType, limit: Option<u32>) -> String {
    if let ColumnType::Other(name) = column_type {
        return name.clone();
    }
    let native = native_type(column_type);
    match limit.or(native.limit) {
        Some(limit) if native.accepts_limit => format!("{}({limit})", native.name),
        _ => native.name.to_string(),
    }
}
