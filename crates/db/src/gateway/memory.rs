//! In-memory store.
//!
//! Backs tests and `DATABASE_URL=memory:` runs. Tables live behind a
//! `tokio::sync::RwLock`; a commit applies every change to a copy of the
//! tables and swaps it in only when all of them succeed, which gives the same
//! all-or-nothing behaviour as a database transaction. Foreign keys and
//! cascade deletes are enforced from the relation metadata carried by each
//! [`Change`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use projecthub_core::types::DbId;
use tokio::sync::RwLock;

use super::{Change, Direction, Entity, GatewayError, Record, Relation, Select, Store, Value};
use crate::models::project::{Project, SEED_PROJECTS};

#[derive(Debug, Clone)]
struct Table {
    next_id: DbId,
    rows: BTreeMap<DbId, Record>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

type Tables = HashMap<&'static str, Table>;

/// Store that keeps every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the same seed projects as the migrations.
    pub fn seeded() -> Self {
        let mut table = Table::default();
        for (name, description) in SEED_PROJECTS {
            let project = Project::new(name, description);
            let id = table.next_id;
            table.next_id += 1;
            table
                .rows
                .insert(id, Record::new(id, 1).with_values(project.values()));
        }

        let mut tables = Tables::new();
        tables.insert(Project::TABLE, table);
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Number of rows currently stored in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map_or(0, |t| t.rows.len())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, select: &Select) -> Result<Vec<Record>, GatewayError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(select.table) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<Record> = table
            .rows
            .values()
            .filter(|r| {
                select
                    .filter
                    .as_ref()
                    .map_or(true, |f| f.matches(select.key, r))
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            for order in &select.order {
                let (x, y) = (a.get(select.key, order.column), b.get(select.key, order.column));
                let ord = compare(x.as_ref(), y.as_ref());
                let ord = match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.id.cmp(&b.id)
        });

        Ok(rows)
    }

    async fn commit(&self, changes: &[Change]) -> Result<Vec<DbId>, GatewayError> {
        let mut tables = self.tables.write().await;
        let mut working = tables.clone();
        let mut inserted = Vec::new();

        for change in changes {
            match change {
                Change::Insert {
                    table,
                    values,
                    parent,
                    ..
                } => {
                    check_parent(&working, *parent, values)?;
                    let t = working.entry(*table).or_default();
                    let id = t.next_id;
                    t.next_id += 1;
                    t.rows
                        .insert(id, Record::new(id, 1).with_values(values.iter().cloned()));
                    inserted.push(id);
                }
                Change::Update {
                    entity,
                    table,
                    id,
                    expected_version,
                    values,
                    parent,
                    ..
                } => {
                    check_parent(&working, *parent, values)?;
                    let row = working
                        .get_mut(table)
                        .and_then(|t| t.rows.get_mut(id))
                        .filter(|r| r.row_version == *expected_version)
                        .ok_or(GatewayError::StaleWrite {
                            entity: *entity,
                            id: *id,
                        })?;
                    row.values.extend(values.iter().cloned());
                    row.row_version += 1;
                }
                Change::Delete {
                    entity,
                    table,
                    id,
                    cascade,
                    ..
                } => {
                    working
                        .get_mut(table)
                        .and_then(|t| t.rows.remove(id))
                        .ok_or(GatewayError::StaleWrite {
                            entity: *entity,
                            id: *id,
                        })?;
                    for child in cascade.iter() {
                        if let Some(t) = working.get_mut(child.table) {
                            t.rows
                                .retain(|_, r| r.values.get(child.column) != Some(&Value::BigInt(*id)));
                        }
                    }
                }
            }
        }

        *tables = working;
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

fn check_parent(
    tables: &Tables,
    parent: Option<Relation>,
    values: &[(&'static str, Value)],
) -> Result<(), GatewayError> {
    let Some(parent) = parent else {
        return Ok(());
    };
    let parent_id = values.iter().find_map(|(c, v)| match v {
        Value::BigInt(id) if *c == parent.column => Some(*id),
        _ => None,
    });
    let exists = parent_id.is_some_and(|id| {
        tables
            .get(parent.table)
            .is_some_and(|t| t.rows.contains_key(&id))
    });
    if exists {
        Ok(())
    } else {
        Err(GatewayError::ForeignKey(format!(
            "{} references missing {} row",
            parent.column, parent.table
        )))
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
