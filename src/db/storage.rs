//! Thin parameterized-query adapter over the SQLite pool.
//!
//! All statements go through positional `?` placeholders bound from
//! [`SqlParam`] values; nothing is spliced into the SQL text.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Arguments, FromRow, SqlitePool};

#[derive(Debug, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StorageError(#[from] sqlx::Error);

/// A single bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Real(value)
    }
}

fn arguments(params: &[SqlParam]) -> SqliteArguments<'_> {
    let mut args = SqliteArguments::default();
    for param in params {
        match param {
            SqlParam::Text(s) => args.add(s.as_str()),
            SqlParam::Integer(i) => args.add(*i),
            SqlParam::Real(f) => args.add(*f),
        }
    }
    args
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a statement, returning the number of rows affected.
    pub async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, StorageError> {
        let result = sqlx::query_with(sql, arguments(params))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn query_one<T>(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Option<T>, StorageError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let row = sqlx::query_as_with::<_, T, _>(sql, arguments(params))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn query_all<T>(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<T>, StorageError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let rows = sqlx::query_as_with::<_, T, _>(sql, arguments(params))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
