//! Primary-key and index metadata.

use oxide_sql_adapter::{Connection, IndexDescriptor, Result};

/// Primary-key columns of `table`.
///
/// Derby stores unquoted identifiers in upper case, so the lookup uses the
/// folded name.
pub fn primary_keys<C: Connection + ?Sized>(connection: &C, table: &str) -> Result<Vec<String>> {
    connection.primary_keys(&table.to_uppercase())
}

/// Indexes of `table`, as the connection reports them.
///
/// The primary-key index is not filtered out.
pub fn indexes<C: Connection + ?Sized>(connection: &C, table: &str) -> Result<Vec<IndexDescriptor>> {
    connection.indexes(table)
}
