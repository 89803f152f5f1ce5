//! PostgreSQL store: one table per model, the model serialized into a JSONB payload column.

use super::{DataStore, Entity, ReadinessProbe};
use crate::error::StoreError;
use crate::sql::{self, TableRef};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::{ConnectOptions, PgPool};
use std::marker::PhantomData;
use std::str::FromStr;

pub struct PgStore<M> {
    pool: PgPool,
    table: TableRef,
    _model: PhantomData<fn() -> M>,
}

impl<M> PgStore<M>
where
    M: Entity + Serialize + DeserializeOwned,
{
    pub fn new(pool: PgPool, table: TableRef) -> Self {
        PgStore {
            pool,
            table,
            _model: PhantomData,
        }
    }

    /// Create the schema and the model table if they do not exist.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        sqlx::query(&sql::create_schema(&self.table))
            .execute(&self.pool)
            .await?;
        sqlx::query(&sql::create_table(&self.table))
            .execute(&self.pool)
            .await?;
        tracing::info!(table = %self.table.qualified(), "model table ready");
        Ok(())
    }
}

/// The `id` column is authoritative; whatever id the payload carries is overwritten.
fn decode_row<M: Entity + DeserializeOwned>(id: i64, payload: Value) -> Result<M, StoreError> {
    let mut model: M = serde_json::from_value(payload)?;
    model.set_id(id);
    Ok(model)
}

#[async_trait]
impl<M> DataStore<M> for PgStore<M>
where
    M: Entity + Serialize + DeserializeOwned,
{
    async fn all(&self) -> Result<Vec<M>, StoreError> {
        let q = sql::select_all(&self.table);
        tracing::debug!(sql = %q, "query");
        let rows: Vec<(i64, Value)> = sqlx::query_as(&q).fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, payload)| decode_row(id, payload))
            .collect()
    }

    async fn insert(&self, mut model: M) -> Result<M, StoreError> {
        let q = sql::insert(&self.table);
        let payload = serde_json::to_value(&model)?;
        tracing::debug!(sql = %q, "query");
        let (id,): (i64,) = sqlx::query_as(&q)
            .bind(&payload)
            .fetch_one(&self.pool)
            .await?;
        model.set_id(id);
        Ok(model)
    }

    async fn save(&self, model: &M) -> Result<(), StoreError> {
        let q = sql::update(&self.table);
        let payload = serde_json::to_value(model)?;
        tracing::debug!(sql = %q, id = model.id(), "query");
        let result = sqlx::query(&q)
            .bind(&payload)
            .bind(model.id())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(model.id()));
        }
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let q = sql::delete(&self.table);
        tracing::debug!(sql = %q, id, "query");
        let result = sqlx::query(&q).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<M> ReadinessProbe for PgStore<M>
where
    M: Entity + Serialize + DeserializeOwned,
{
    async fn ping(&self) -> Result<(), StoreError> {
        ReadinessProbe::ping(&self.pool).await
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::InvalidDatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| StoreError::InvalidDatabaseUrl("missing scheme".into()))?
        + 3;
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::InvalidDatabaseUrl("no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
