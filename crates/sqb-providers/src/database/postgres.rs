//! PostgreSQL database provider
//!
//! One component serving both sides of the relational contract: schema
//! introspection (SchemaProvider) and statement execution (SqlExecutor),
//! sharing a single connection pool for the provider's lifetime. The
//! postgres driver is synchronous, so every call runs under
//! `spawn_blocking` to keep the async runtime unblocked.

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::{self, NoTls, Row};
use tracing::debug;

use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::{SchemaProvider, SqlExecutor};
use sqb_domain::value_objects::{QueryRows, TableSchema, schema_text};

/// Connection settings for [`PostgresDatabase`]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name to connect to
    pub dbname: String,
    /// Login user
    pub user: String,
    /// Login password
    pub password: String,
    /// Maximum pooled connections
    pub pool_size: u32,
}

const TABLES_SQL: &str = "SELECT table_name::text FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE' AND table_schema = 'public' \
     ORDER BY table_name";

const COLUMNS_SQL: &str = "SELECT column_name::text FROM information_schema.columns \
     WHERE table_name = $1 AND table_schema = 'public' \
     ORDER BY ordinal_position";

/// PostgreSQL-backed schema provider and SQL executor
pub struct PostgresDatabase {
    pool: Pool<PostgresConnectionManager<NoTls>>,
    dbname: String,
}

impl PostgresDatabase {
    /// Create the provider and its connection pool.
    ///
    /// Connections are established lazily on first use, so construction does
    /// not require the server to be up.
    pub fn connect(config: &PostgresConfig) -> Self {
        let mut pg_config = postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .password(&config.password);

        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .build_unchecked(manager);

        Self {
            pool,
            dbname: config.dbname.clone(),
        }
    }

    /// The database this provider is connected to.
    pub fn dbname(&self) -> &str {
        &self.dbname
    }
}

#[async_trait]
impl SchemaProvider for PostgresDatabase {
    async fn fetch_schema_text(&self, database: &str) -> Result<String> {
        // One provider, one database: the connection is fixed at construction,
        // so a request for any other database is unreachable by contract.
        if database != self.dbname {
            return Err(Error::schema_retrieval(format!(
                "database '{}' is not reachable by this provider (connected to '{}')",
                database, self.dbname
            )));
        }

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<String> {
            let mut client = pool.get().map_err(|e| {
                Error::schema_retrieval_with_source("failed to acquire database connection", e)
            })?;

            let table_rows = client
                .query(TABLES_SQL, &[])
                .map_err(|e| Error::schema_retrieval_with_source("failed to list tables", e))?;

            let mut tables = Vec::with_capacity(table_rows.len());
            for row in table_rows {
                let name: String = row.get(0);
                let column_rows = client.query(COLUMNS_SQL, &[&name]).map_err(|e| {
                    Error::schema_retrieval_with_source(
                        format!("failed to list columns for table '{name}'"),
                        e,
                    )
                })?;
                let columns = column_rows
                    .iter()
                    .map(|r| r.get::<_, String>(0))
                    .collect();
                tables.push(TableSchema { name, columns });
            }

            Ok(schema_text(&tables))
        })
        .await
        .map_err(|e| Error::internal(format!("schema introspection task failed: {e}")))?
    }

    async fn close(&self) -> Result<()> {
        // Pooled connections are released when the pool drops; nothing to
        // tear down eagerly.
        debug!(dbname = %self.dbname, "postgres provider closed");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "postgres"
    }
}

#[async_trait]
impl SqlExecutor for PostgresDatabase {
    async fn execute(&self, sql: &str) -> Result<QueryRows> {
        let pool = self.pool.clone();
        let sql = sql.to_string();
        tokio::task::spawn_blocking(move || -> Result<QueryRows> {
            let mut client = pool
                .get()
                .map_err(|e| Error::sql_execution(e.to_string()))?;

            // Prepare first so column names are available even for empty
            // result sets.
            let statement = client
                .prepare(&sql)
                .map_err(|e| Error::sql_execution(engine_message(&e)))?;
            let rows = client
                .query(&statement, &[])
                .map_err(|e| Error::sql_execution(engine_message(&e)))?;

            let columns: Vec<String> = statement
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();

            let data = rows
                .iter()
                .map(|row| {
                    (0..columns.len())
                        .map(|idx| cell_to_json(row, idx))
                        .collect()
                })
                .collect();

            Ok(QueryRows {
                columns,
                rows: data,
            })
        })
        .await
        .map_err(|e| Error::internal(format!("SQL execution task failed: {e}")))?
    }

    async fn close(&self) -> Result<()> {
        SchemaProvider::close(self).await
    }

    fn provider_name(&self) -> &str {
        "postgres"
    }
}

/// The engine's own message for a driver error, verbatim when present.
///
/// A generated statement is often invalid; the server message is the user's
/// only diagnostic, so it must not be rewritten.
fn engine_message(err: &postgres::Error) -> String {
    err.as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Convert one result cell to a JSON value based on its column type.
fn cell_to_json(row: &Row, idx: usize) -> serde_json::Value {
    use serde_json::Value;

    let ty = row.columns()[idx].type_();
    match ty.name() {
        "bool" => opt_value(row.try_get::<_, Option<bool>>(idx), Value::Bool),
        "int2" => opt_value(row.try_get::<_, Option<i16>>(idx), |v| Value::from(v)),
        "int4" => opt_value(row.try_get::<_, Option<i32>>(idx), |v| Value::from(v)),
        "int8" => opt_value(row.try_get::<_, Option<i64>>(idx), |v| Value::from(v)),
        "float4" => opt_value(row.try_get::<_, Option<f32>>(idx), |v| Value::from(f64::from(v))),
        "float8" => opt_value(row.try_get::<_, Option<f64>>(idx), Value::from),
        "text" | "varchar" | "bpchar" | "name" => {
            opt_value(row.try_get::<_, Option<String>>(idx), Value::String)
        }
        // Types without a native mapping are surfaced as text when the
        // driver can render them, null otherwise.
        _ => opt_value(row.try_get::<_, Option<String>>(idx), Value::String),
    }
}

fn opt_value<T>(
    cell: std::result::Result<Option<T>, postgres::Error>,
    to_value: impl Fn(T) -> serde_json::Value,
) -> serde_json::Value {
    match cell {
        Ok(Some(v)) => to_value(v),
        _ => serde_json::Value::Null,
    }
}
