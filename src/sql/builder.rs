//! Builds the DDL and the parameterized SELECT, INSERT, UPDATE, DELETE for a model table.
//!
//! A model table has three columns: `id BIGSERIAL` primary key, the model as `payload JSONB`
//! and `updated_at`.

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified table holding one model type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        TableRef {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Full qualified table name, quoted.
    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(&self.table))
    }
}

pub fn create_schema(table: &TableRef) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&table.schema))
}

pub fn create_table(table: &TableRef) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {} (
    id BIGSERIAL PRIMARY KEY,
    payload JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)"#,
        table.qualified()
    )
}

/// Rows as `(id, payload)`, in id order.
pub fn select_all(table: &TableRef) -> String {
    format!("SELECT id, payload FROM {} ORDER BY id", table.qualified())
}

/// `$1` = payload. Returns the assigned id.
pub fn insert(table: &TableRef) -> String {
    format!(
        "INSERT INTO {} (payload, updated_at) VALUES ($1, NOW()) RETURNING id",
        table.qualified()
    )
}

/// `$1` = payload, `$2` = id.
pub fn update(table: &TableRef) -> String {
    format!(
        "UPDATE {} SET payload = $1, updated_at = NOW() WHERE id = $2",
        table.qualified()
    )
}

/// `$1` = id.
pub fn delete(table: &TableRef) -> String {
    format!("DELETE FROM {} WHERE id = $1", table.qualified())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> TableRef {
        TableRef::new("crud", "book")
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(books().qualified(), "\"crud\".\"book\"");
        assert_eq!(TableRef::new("s", "we\"ird").qualified(), "\"s\".\"we\"\"ird\"");
    }

    #[test]
    fn builds_statements() {
        let t = books();
        assert_eq!(create_schema(&t), "CREATE SCHEMA IF NOT EXISTS \"crud\"");
        assert!(create_table(&t).starts_with("CREATE TABLE IF NOT EXISTS \"crud\".\"book\" ("));
        assert_eq!(select_all(&t), "SELECT id, payload FROM \"crud\".\"book\" ORDER BY id");
        assert_eq!(
            insert(&t),
            "INSERT INTO \"crud\".\"book\" (payload, updated_at) VALUES ($1, NOW()) RETURNING id"
        );
        assert_eq!(
            update(&t),
            "UPDATE \"crud\".\"book\" SET payload = $1, updated_at = NOW() WHERE id = $2"
        );
        assert_eq!(delete(&t), "DELETE FROM \"crud\".\"book\" WHERE id = $1");
    }
}
