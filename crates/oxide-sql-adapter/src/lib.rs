//! # oxide-sql-adapter
//!
//! Engine-neutral contracts for bridging an ORM to one database dialect.
//!
//! This crate provides:
//! - [`SqlValue`] and [`Row`] for values crossing the driver boundary
//! - [`Column`] and [`ColumnType`] for the ORM's view of a table
//! - [`QueryWindow`] for client-side LIMIT/OFFSET
//! - The [`Connection`] and [`OrmBridge`] collaborator traits
//! - The [`DialectAdapter`] capability trait that dialect crates implement
//! - [`AdapterConfig`] for selecting a dialect and a time zone policy
//!
//! Dialect crates such as `oxide-sql-derby` implement [`DialectAdapter`] on
//! top of these types.

pub mod config;
pub mod connection;
pub mod dialect;
mod error;
pub mod schema;
pub mod value;
pub mod window;

pub use config::{AdapterConfig, DialectKind, TimezonePolicy};
pub use connection::{Connection, OrmBridge};
pub use dialect::{DialectAdapter, ExecuteResult};
pub use error::{AdapterError, Result};
pub use schema::{
    AlterTableOp, ChangeColumnOptions, Column, ColumnType, IndexDescriptor, IndexTarget,
    ModelDescriptor, TableDefinition,
};
pub use value::{Row, SqlValue, ToSqlValue};
pub use window::{Limit, QueryWindow};
