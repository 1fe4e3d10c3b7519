//! Rendering host values as Derby SQL literals.

use oxide_sql_adapter::value::quote_text;
use oxide_sql_adapter::{Column, ColumnType, SqlValue};

/// Derby has no boolean literals; booleans are stored as 1/0.
pub const QUOTED_TRUE: &str = "1";
/// See [`QUOTED_TRUE`].
pub const QUOTED_FALSE: &str = "0";

/// Quotes `value` for `column`, delegating unhandled values to `generic`.
///
/// Identity columns take the value's plain text so the engine's identity
/// syntax survives. Text is rendered according to the column type: BLOB
/// casts for binary columns, string literals for string columns, and bare
/// integers elsewhere when the text is exactly an integer.
pub fn quote_with<F>(value: &SqlValue, column: Option<&Column>, generic: F) -> String
where
    F: FnOnce(&SqlValue, Option<&Column>) -> String,
{
    let column_type = column.map(|c| &c.column_type);
    if column_type == Some(&ColumnType::PrimaryKey) {
        return value.to_string();
    }

    match value {
        SqlValue::Text(text) => match column_type {
            Some(ColumnType::Binary) => blob_literal(text.as_bytes()),
            Some(ColumnType::String) => quote_text(text),
            _ if is_integer_text(text) => text.clone(),
            _ => quote_text(text),
        },
        SqlValue::Blob(bytes) => blob_literal(bytes),
        SqlValue::Bool(true) => QUOTED_TRUE.to_string(),
        SqlValue::Bool(false) => QUOTED_FALSE.to_string(),
        other => generic(other, column),
    }
}

/// Returns true when `text` is exactly the decimal form of an integer.
///
/// That is an optional `-` and digits without leading zeros, of any
/// magnitude; `-0` is not canonical.
#[must_use]
pub fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    !digits.starts_with('0') || text == "0"
}

/// Renders bytes as `CAST(x'<hex>' AS BLOB)`, two hex digits per byte.
#[must_use]
pub fn blob_literal(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("CAST(x'{hex}' AS BLOB)")
}
