//! PostgreSQL store.
//!
//! SQL is generated from entity metadata. Identifiers come from `&'static str`
//! table and column names; every value is bound as a parameter.

use async_trait::async_trait;
use projecthub_core::types::{DbId, Timestamp};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query as SqlQuery;
use sqlx::{PgPool, Postgres, Row};

use super::{
    Change, Column, ColumnKind, Direction, Filter, GatewayError, Record, Select, Store, Value,
    ROW_VERSION,
};

/// PostgreSQL error code for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn select(&self, select: &Select) -> Result<Vec<Record>, GatewayError> {
        let (sql, binds) = select_sql(select);
        let rows = bind_all(sqlx::query(&sql), &binds)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        rows.iter()
            .map(|row| decode_row(row, select.key, select.columns))
            .collect()
    }

    async fn commit(&self, changes: &[Change]) -> Result<Vec<DbId>, GatewayError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::new();

        for change in changes {
            match change {
                Change::Insert {
                    table, key, values, ..
                } => {
                    let sql = insert_sql(table, key, values);
                    let row = bind_all(sqlx::query(&sql), values.iter().map(|(_, v)| v))
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(classify)?;
                    inserted.push(row.try_get::<i64, _>(0)?);
                }
                Change::Update {
                    entity,
                    table,
                    key,
                    id,
                    expected_version,
                    values,
                    ..
                } => {
                    let sql = update_sql(table, key, values);
                    let result = bind_all(sqlx::query(&sql), values.iter().map(|(_, v)| v))
                        .bind(*id)
                        .bind(*expected_version)
                        .execute(&mut *tx)
                        .await
                        .map_err(classify)?;
                    if result.rows_affected() == 0 {
                        return Err(GatewayError::StaleWrite {
                            entity: *entity,
                            id: *id,
                        });
                    }
                }
                Change::Delete {
                    entity,
                    table,
                    key,
                    id,
                    ..
                } => {
                    // Dependent rows are removed by ON DELETE CASCADE.
                    let sql = format!("DELETE FROM {table} WHERE {key} = $1");
                    let result = sqlx::query(&sql)
                        .bind(*id)
                        .execute(&mut *tx)
                        .await
                        .map_err(classify)?;
                    if result.rows_affected() == 0 {
                        return Err(GatewayError::StaleWrite {
                            entity: *entity,
                            id: *id,
                        });
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SQL generation
// ---------------------------------------------------------------------------

fn select_sql(select: &Select) -> (String, Vec<Value>) {
    let columns: Vec<&str> = std::iter::once(select.key)
        .chain(std::iter::once(ROW_VERSION))
        .chain(select.columns.iter().map(|c| c.name))
        .collect();

    let mut sql = format!("SELECT {} FROM {}", columns.join(", "), select.table);
    let mut binds = Vec::new();

    if let Some(filter) = &select.filter {
        sql.push_str(" WHERE ");
        push_filter(&mut sql, &mut binds, filter);
    }

    let order: Vec<String> = select
        .order
        .iter()
        .map(|o| {
            let dir = match o.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {dir}", o.column)
        })
        .chain(std::iter::once(format!("{} ASC", select.key)))
        .collect();
    sql.push_str(" ORDER BY ");
    sql.push_str(&order.join(", "));

    (sql, binds)
}

fn push_filter(sql: &mut String, binds: &mut Vec<Value>, filter: &Filter) {
    match filter {
        Filter::Eq(column, Value::Null) => {
            sql.push_str(&format!("{column} IS NULL"));
        }
        Filter::Eq(column, value) => {
            binds.push(value.clone());
            sql.push_str(&format!("{column} = ${}", binds.len()));
        }
        Filter::ContainsIgnoreCase(column, needle) => {
            binds.push(Value::Text(format!("%{}%", escape_like(needle))));
            sql.push_str(&format!("{column} ILIKE ${}", binds.len()));
        }
        Filter::And(filters) => push_group(sql, binds, filters, " AND ", "TRUE"),
        Filter::Or(filters) => push_group(sql, binds, filters, " OR ", "FALSE"),
    }
}

fn push_group(
    sql: &mut String,
    binds: &mut Vec<Value>,
    filters: &[Filter],
    joiner: &str,
    empty: &str,
) {
    if filters.is_empty() {
        sql.push_str(empty);
        return;
    }
    sql.push('(');
    for (i, f) in filters.iter().enumerate() {
        if i > 0 {
            sql.push_str(joiner);
        }
        push_filter(sql, binds, f);
    }
    sql.push(')');
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn insert_sql(table: &str, key: &str, values: &[(&'static str, Value)]) -> String {
    let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING {key}",
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql(table: &str, key: &str, values: &[(&'static str, Value)]) -> String {
    let assignments: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, (c, _))| format!("{c} = ${}", i + 1))
        .collect();
    let id_idx = values.len() + 1;
    format!(
        "UPDATE {table} SET {}, {ROW_VERSION} = {ROW_VERSION} + 1 \
         WHERE {key} = ${id_idx} AND {ROW_VERSION} = ${}",
        assignments.join(", "),
        id_idx + 1
    )
}

// ---------------------------------------------------------------------------
// Binding and decoding
// ---------------------------------------------------------------------------

fn bind_all<'q, 'v>(
    mut query: SqlQuery<'q, Postgres, PgArguments>,
    values: impl IntoIterator<Item = &'v Value>,
) -> SqlQuery<'q, Postgres, PgArguments> {
    for value in values {
        query = match value {
            Value::BigInt(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.clone()),
            Value::Timestamp(v) => query.bind(*v),
            Value::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

fn decode_row(row: &PgRow, key: &str, columns: &[Column]) -> Result<Record, GatewayError> {
    let mut record = Record::new(row.try_get::<i64, _>(key)?, row.try_get::<i32, _>(ROW_VERSION)?);
    for column in columns {
        let value = match column.kind {
            ColumnKind::BigInt => Value::BigInt(row.try_get::<i64, _>(column.name)?),
            ColumnKind::Text => Value::Text(row.try_get::<String, _>(column.name)?),
            ColumnKind::NullableText => row.try_get::<Option<String>, _>(column.name)?.into(),
            ColumnKind::Timestamp => Value::Timestamp(row.try_get::<Timestamp, _>(column.name)?),
        };
        record.values.insert(column.name, value);
    }
    Ok(record)
}

/// Map driver errors onto gateway errors, singling out FK violations.
fn classify(err: sqlx::Error) -> GatewayError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return GatewayError::ForeignKey(constraint);
        }
    }
    GatewayError::Database(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
