//! Copy-table plans for column changes Derby cannot express.
//!
//! Releases before 10.3 have neither `DROP COLUMN` nor `RENAME COLUMN`. The
//! change is instead made by creating a staging table with the altered
//! definition, copying the rows across, dropping the original and renaming
//! the staging table into its place.

use oxide_sql_adapter::{AlterTableOp, Column, ColumnType, IndexDescriptor, Result, TableDefinition};

use crate::schema::rename_table_sql;
use crate::types::type_to_sql;

/// A planned table rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRebuild {
    /// Table being rebuilt.
    pub table: String,
    /// Name of the staging table.
    pub staging: String,
    /// Definition the table has once the plan has run.
    pub altered: TableDefinition,
    /// Statements to run, in order.
    pub statements: Vec<String>,
}

impl TableRebuild {
    /// Plans the rebuild of `definition` with `op` applied.
    pub fn plan(definition: &TableDefinition, op: &AlterTableOp) -> Result<Self> {
        let altered = definition.altered(op)?;
        let table = definition.name.clone();
        let staging = format!("altered_{table}");

        let targets: Vec<&str> = altered.columns.iter().map(|c| c.name.as_str()).collect();
        let sources: Vec<&str> = targets.iter().map(|name| op.source_name(name)).collect();

        let mut statements = vec![
            create_table_sql(&staging, &altered),
            format!(
                "INSERT INTO {staging} ({}) SELECT {} FROM {table}",
                targets.join(", "),
                sources.join(", ")
            ),
            format!("DROP TABLE {table}"),
            rename_table_sql(&staging, &table),
        ];
        statements.extend(
            altered
                .indexes
                .iter()
                .map(|index| create_index_sql(&table, index)),
        );

        Ok(Self {
            table,
            staging,
            altered,
            statements,
        })
    }

    /// The identity column whose sequence must be restarted after the copy.
    ///
    /// Only `primary_key` columns are created as identity columns; an
    /// integer key with a separate constraint has no sequence.
    #[must_use]
    pub fn identity_column(&self) -> Option<&Column> {
        let pk = self.altered.primary_key.as_deref()?;
        self.altered
            .get_column(pk)
            .filter(|c| c.column_type == ColumnType::PrimaryKey)
    }
}

fn create_table_sql(name: &str, definition: &TableDefinition) -> String {
    let mut parts: Vec<String> = definition.columns.iter().map(column_sql).collect();

    if let Some(pk) = &definition.primary_key {
        let inline = definition
            .get_column(pk)
            .is_some_and(|c| c.column_type == ColumnType::PrimaryKey);
        if !inline {
            parts.push(format!("PRIMARY KEY ({pk})"));
        }
    }

    format!("CREATE TABLE {name} ({})", parts.join(", "))
}

fn column_sql(column: &Column) -> String {
    let mut sql = format!(
        "{} {}",
        column.name,
        type_to_sql(&column.column_type, column.limit)
    );
    // The identity definition already carries its constraints.
    if column.column_type != ColumnType::PrimaryKey {
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
    }
    sql
}

fn create_index_sql(table: &str, index: &IndexDescriptor) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    format!(
        "CREATE {unique}INDEX {} ON {table} ({})",
        index.name,
        index.columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use oxide_sql_adapter::AdapterError;

    use super::*;

    fn posts() -> TableDefinition {
        TableDefinition::new("posts")
            .column(Column::new("id", ColumnType::PrimaryKey))
            .column(Column::new("title", ColumnType::String).limit(120).not_null())
            .column(Column::new("views", ColumnType::Integer).default("0"))
            .column(Column::new("body", ColumnType::Text))
            .index(IndexDescriptor {
                table: "posts".to_string(),
                name: "index_posts_on_title".to_string(),
                unique: false,
                columns: vec!["title".to_string()],
            })
    }

    #[test]
    fn test_drop_column_plan() {
        let plan =
            TableRebuild::plan(&posts(), &AlterTableOp::DropColumn("body".to_string())).unwrap();
        assert_eq!(
            plan.statements,
            vec![
                "CREATE TABLE altered_posts (id int generated by default as identity NOT NULL \
                 PRIMARY KEY, title varchar(120) NOT NULL, views integer DEFAULT 0)"
                    .to_string(),
                "INSERT INTO altered_posts (id, title, views) SELECT id, title, views FROM posts"
                    .to_string(),
                "DROP TABLE posts".to_string(),
                "RENAME TABLE altered_posts TO posts".to_string(),
                "CREATE INDEX index_posts_on_title ON posts (title)".to_string(),
            ]
        );
        assert_eq!(plan.identity_column().map(|c| c.name.as_str()), Some("id"));
    }

    #[test]
    fn test_rename_column_plan_copies_from_old_name() {
        let plan = TableRebuild::plan(&posts(), &AlterTableOp::rename("title", "headline")).unwrap();
        assert_eq!(
            plan.statements[1],
            "INSERT INTO altered_posts (id, headline, views, body) \
             SELECT id, title, views, body FROM posts"
        );
        assert_eq!(
            plan.statements[4],
            "CREATE INDEX index_posts_on_title ON posts (headline)"
        );
    }

    #[test]
    fn test_explicit_primary_key_constraint() {
        let table = TableDefinition {
            primary_key: Some("code".to_string()),
            ..TableDefinition::new("countries")
                .column(Column::new("code", ColumnType::String).limit(2).not_null())
                .column(Column::new("name", ColumnType::String))
        };
        let plan = TableRebuild::plan(&table, &AlterTableOp::rename("name", "label")).unwrap();
        assert_eq!(
            plan.statements[0],
            "CREATE TABLE altered_countries (code varchar(2) NOT NULL, label varchar(255), \
             PRIMARY KEY (code))"
        );
        assert!(plan.identity_column().is_none());
    }

    #[test]
    fn test_integer_key_is_not_an_identity() {
        let table = TableDefinition {
            primary_key: Some("id".to_string()),
            ..TableDefinition::new("posts")
                .column(Column::new("id", ColumnType::Integer).not_null())
                .column(Column::new("body", ColumnType::Text))
        };
        let plan = TableRebuild::plan(&table, &AlterTableOp::DropColumn("body".to_string())).unwrap();
        assert_eq!(
            plan.statements[0],
            "CREATE TABLE altered_posts (id integer NOT NULL, PRIMARY KEY (id))"
        );
        assert!(plan.identity_column().is_none());
    }

    #[test]
    fn test_unknown_column() {
        let err = TableRebuild::plan(&posts(), &AlterTableOp::DropColumn("nope".to_string()))
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnknownColumn { .. }));
    }
}
