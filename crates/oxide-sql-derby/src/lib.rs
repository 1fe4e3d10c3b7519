//! # oxide-sql-derby
//!
//! Apache Derby dialect adapter for `oxide-sql-adapter`.
//!
//! # How Derby differs from other dialects
//!
//! - **No LIMIT/OFFSET**: releases before 10.5 have neither `LIMIT` nor
//!   `OFFSET ... FETCH`. Reads run in full and the [`QueryWindow`] is applied
//!   to the returned rows.
//! - **Identity columns**: primary keys are
//!   `int generated by default as identity`, and sequences are restarted with
//!   `ALTER TABLE ... ALTER COLUMN ... RESTART WITH n`.
//! - **Limited ALTER COLUMN**: the only type change Derby accepts is
//!   widening a `VARCHAR`; other type changes are skipped.
//! - **DROP/RENAME COLUMN**: only from 10.3. On older releases the statement
//!   fails with an unsupported-syntax error and the change goes through the
//!   ORM's generic alter-table route (see [`rebuild`]).
//! - **Case folding**: unquoted identifiers are stored upper case, so
//!   metadata lookups fold table names.
//! - **No boolean literals**: `true`/`false` are written as `1`/`0`.
//!
//! [`QueryWindow`]: oxide_sql_adapter::QueryWindow
//!
//! ## Example
//!
//! ```rust,ignore
//! use oxide_sql_adapter::AdapterConfig;
//! use oxide_sql_derby::adapter_for;
//!
//! let config = AdapterConfig::from_json(r#"{ "dialect": "derby" }"#)?;
//! let adapter = adapter_for(config, connection, orm)?;
//! let first = adapter.select_one("SELECT * FROM users ORDER BY id", None, Default::default())?;
//! ```

mod adapter;
pub mod cast;
pub mod executor;
pub mod metadata;
pub mod quote;
pub mod rebuild;
mod schema;
pub mod types;

pub use adapter::DerbyAdapter;
pub use cast::CastError;
pub use rebuild::TableRebuild;

use oxide_sql_adapter::{
    AdapterConfig, AdapterError, Connection, DialectAdapter, DialectKind, OrmBridge, Result,
};

/// Builds the adapter selected by `config`.
pub fn adapter_for<'a, C, O>(
    config: AdapterConfig,
    connection: C,
    orm: O,
) -> Result<Box<dyn DialectAdapter + 'a>>
where
    C: Connection + 'a,
    O: OrmBridge + 'a,
{
    config.validate()?;
    match config.dialect {
        DialectKind::Derby => Ok(Box::new(DerbyAdapter::new(config, connection, orm))),
        other => Err(AdapterError::UnknownDialect(format!("{other:?}"))),
    }
}
