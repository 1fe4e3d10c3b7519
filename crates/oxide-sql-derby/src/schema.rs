//! DDL statements for Derby's `ALTER TABLE` dialect.
//!
//! Derby cannot change a column's type or shrink its precision; the only
//! type change it accepts is widening a `VARCHAR`. `DROP COLUMN` and
//! `RENAME COLUMN` only exist from 10.3 on.

/// `ALTER TABLE t ALTER COLUMN c SET DEFAULT <default>`.
pub(crate) fn set_default_sql(table: &str, column: &str, quoted_default: &str) -> String {
    format!("ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {quoted_default}")
}

/// `ALTER TABLE t ALTER COLUMN c SET DATA TYPE <type>`.
pub(crate) fn set_data_type_sql(table: &str, column: &str, type_sql: &str) -> String {
    format!("ALTER TABLE {table} ALTER COLUMN {column} SET DATA TYPE {type_sql}")
}

/// `ALTER TABLE t ALTER COLUMN c [NOT] NULL`.
pub(crate) fn set_nullable_sql(table: &str, column: &str, nullable: bool) -> String {
    let constraint = if nullable { "NULL" } else { "NOT NULL" };
    format!("ALTER TABLE {table} ALTER COLUMN {column} {constraint}")
}

pub(crate) fn rename_table_sql(name: &str, new_name: &str) -> String {
    format!("RENAME TABLE {name} TO {new_name}")
}

pub(crate) fn drop_index_sql(index: &str) -> String {
    format!("DROP INDEX {index}")
}

pub(crate) fn drop_column_sql(table: &str, column: &str) -> String {
    format!("ALTER TABLE {table} DROP COLUMN {column} RESTRICT")
}

pub(crate) fn rename_column_sql(table: &str, column: &str, new_column: &str) -> String {
    format!("ALTER TABLE {table} ALTER RENAME COLUMN {column} TO {new_column}")
}

pub(crate) fn max_value_sql(table: &str, column: &str) -> String {
    format!("SELECT MAX({column}) FROM {table}")
}

/// Restarts an identity column at `next`.
pub(crate) fn restart_identity_sql(table: &str, column: &str, next: i64) -> String {
    format!("ALTER TABLE {table} ALTER COLUMN {column} RESTART WITH {next}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_column_statements() {
        assert_eq!(
            set_default_sql("users", "role", "'member'"),
            "ALTER TABLE users ALTER COLUMN role SET DEFAULT 'member'"
        );
        assert_eq!(
            set_data_type_sql("users", "name", "varchar(80)"),
            "ALTER TABLE users ALTER COLUMN name SET DATA TYPE varchar(80)"
        );
        assert_eq!(
            set_nullable_sql("users", "name", false),
            "ALTER TABLE users ALTER COLUMN name NOT NULL"
        );
        assert_eq!(
            set_nullable_sql("users", "name", true),
            "ALTER TABLE users ALTER COLUMN name NULL"
        );
    }

    #[test]
    fn test_table_statements() {
        assert_eq!(rename_table_sql("users", "people"), "RENAME TABLE users TO people");
        assert_eq!(drop_index_sql("index_users_on_email"), "DROP INDEX index_users_on_email");
        assert_eq!(
            drop_column_sql("users", "email"),
            "ALTER TABLE users DROP COLUMN email RESTRICT"
        );
        assert_eq!(
            rename_column_sql("users", "name", "full_name"),
            "ALTER TABLE users ALTER RENAME COLUMN name TO full_name"
        );
    }

    #[test]
    fn test_sequence_statements() {
        assert_eq!(max_value_sql("users", "id"), "SELECT MAX(id) FROM users");
        assert_eq!(
            restart_identity_sql("users", "id", 42),
            "ALTER TABLE users ALTER COLUMN id RESTART WITH 42"
        );
    }
}
