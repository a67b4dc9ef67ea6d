use crate::record_set::{RecordSet, NULL_VALUE};
use crate::source::{MetadataSource, SourceError};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;

/// A [`MetadataSource`] backed by an embedded SQLite database.
#[derive(Debug)]
pub struct SqliteMetadataSource {
    connection: Connection,
}

impl SqliteMetadataSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let connection = Connection::open(path).map_err(map_error)?;
        Ok(Self { connection })
    }

    pub fn open_in_memory() -> Result<Self, SourceError> {
        let connection = Connection::open_in_memory().map_err(map_error)?;
        Ok(Self { connection })
    }
}

impl MetadataSource for SqliteMetadataSource {
    fn begin(&mut self) -> Result<(), SourceError> {
        self.connection.execute_batch("BEGIN").map_err(map_error)
    }

    fn commit(&mut self) -> Result<(), SourceError> {
        self.connection.execute_batch("COMMIT").map_err(map_error)
    }

    fn rollback(&mut self) -> Result<(), SourceError> {
        self.connection.execute_batch("ROLLBACK").map_err(map_error)
    }

    fn execute(&mut self, sql: &str) -> Result<RecordSet, SourceError> {
        let mut statement = self.connection.prepare(sql).map_err(map_error)?;
        if statement.column_count() == 0 {
            statement.execute([]).map_err(map_error)?;
            return Ok(RecordSet::default());
        }

        let column_names: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let column_count = column_names.len();
        let mut record_set = RecordSet::new(column_names);

        let mut rows = statement.query([]).map_err(map_error)?;
        while let Some(row) = rows.next().map_err(map_error)? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                let value = match row.get_ref(index).map_err(map_error)? {
                    ValueRef::Null => NULL_VALUE.to_owned(),
                    ValueRef::Integer(v) => v.to_string(),
                    ValueRef::Real(v) => v.to_string(),
                    ValueRef::Text(v) => String::from_utf8_lossy(v).into_owned(),
                    ValueRef::Blob(v) => String::from_utf8_lossy(v).into_owned(),
                };
                values.push(value);
            }
            record_set.push_row(values);
        }
        Ok(record_set)
    }

    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    fn last_insert_id(&mut self) -> Result<i64, SourceError> {
        Ok(self.connection.last_insert_rowid())
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn in_transaction(&self) -> bool {
        !self.connection.is_autocommit()
    }
}

fn map_error(error: rusqlite::Error) -> SourceError {
    match &error {
        rusqlite::Error::SqliteFailure(cause, _)
            if cause.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            SourceError::Constraint {
                message: error.to_string(),
            }
        }
        _ => SourceError::Execution {
            message: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_stringifies_rows_and_nulls() -> anyhow::Result<()> {
        let mut source = SqliteMetadataSource::open_in_memory()?;
        source.execute("CREATE TABLE t (a INT, b TEXT, c DOUBLE)")?;
        source.execute("INSERT INTO t VALUES (1, NULL, 0.5)")?;

        let set = source.execute("SELECT a, b, c FROM t")?;
        assert_eq!(set.len(), 1);
        assert_eq!(set.value(0, "a"), Some("1"));
        assert_eq!(set.value(0, "b"), Some(NULL_VALUE));
        assert_eq!(set.value(0, "c"), Some("0.5"));
        Ok(())
    }

    #[test]
    fn escape_doubles_single_quotes() -> anyhow::Result<()> {
        let source = SqliteMetadataSource::open_in_memory()?;
        assert_eq!(source.escape_string("it's"), "it''s");
        assert_eq!(source.escape_string("plain"), "plain");
        Ok(())
    }

    #[test]
    fn transaction_state_is_observable() -> anyhow::Result<()> {
        let mut source = SqliteMetadataSource::open_in_memory()?;
        assert!(!source.in_transaction());
        source.begin()?;
        assert!(source.in_transaction());
        source.rollback()?;
        assert!(!source.in_transaction());
        Ok(())
    }

    #[test]
    fn constraint_violations_are_distinguished() -> anyhow::Result<()> {
        let mut source = SqliteMetadataSource::open_in_memory()?;
        source.execute("CREATE TABLE t (a INT PRIMARY KEY)")?;
        source.execute("INSERT INTO t VALUES (1)")?;
        match source.execute("INSERT INTO t VALUES (1)") {
            Err(SourceError::Constraint { .. }) => Ok(()),
            other => anyhow::bail!("expected a constraint violation, got {other:?}"),
        }
    }
}
