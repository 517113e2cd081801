use std::sync::Arc;

use projecthub_core::types::DbId;

use super::{Change, Entity, GatewayError, Query, Store};

/// Handle to a staged insert, resolved to a generated identity after save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staged(usize);

/// Outcome of a successful [`Session::save`].
#[derive(Debug, Default)]
pub struct SaveReport {
    inserted: Vec<DbId>,
}

impl SaveReport {
    /// Identity generated for a staged insert.
    pub fn inserted_id(&self, staged: Staged) -> Option<DbId> {
        self.inserted.get(staged.0).copied()
    }
}

/// Request-scoped unit of work.
///
/// Reads go straight to the store. `add`, `update`, and `remove` only stage
/// a change; [`Session::save`] commits everything staged so far as one unit.
/// A session is owned by a single request and never shared.
pub struct Session {
    store: Arc<dyn Store>,
    pending: Vec<Change>,
    staged_inserts: usize,
}

impl Session {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            pending: Vec::new(),
            staged_inserts: 0,
        }
    }

    // -- reads ---------------------------------------------------------------

    /// Every row of `E` in natural (insertion) order.
    pub async fn list_all<E: Entity>(&self) -> Result<Vec<E>, GatewayError> {
        self.fetch(&Query::<E>::new()).await
    }

    /// Point lookup on the primary key.
    pub async fn find_by_id<E: Entity>(&self, id: DbId) -> Result<Option<E>, GatewayError> {
        Ok(self.fetch(&Query::<E>::by_id(id)).await?.into_iter().next())
    }

    pub async fn exists<E: Entity>(&self, id: DbId) -> Result<bool, GatewayError> {
        Ok(self.find_by_id::<E>(id).await?.is_some())
    }

    /// Materialize a query.
    pub async fn fetch<E: Entity>(&self, query: &Query<E>) -> Result<Vec<E>, GatewayError> {
        let records = self.store.select(&query.to_select()).await?;
        records.iter().map(E::from_record).collect()
    }

    // -- staged mutations ----------------------------------------------------

    /// Stage an insert. The entity's own id and version are ignored.
    pub fn add<E: Entity>(&mut self, entity: &E) -> Staged {
        self.pending.push(Change::Insert {
            entity: E::NAME,
            table: E::TABLE,
            key: E::KEY,
            values: entity.values(),
            parent: E::PARENT,
        });
        let staged = Staged(self.staged_inserts);
        self.staged_inserts += 1;
        staged
    }

    /// Stage an update of every data column. The save fails with
    /// [`GatewayError::StaleWrite`] unless the stored `row_version` still
    /// equals `entity.row_version()`.
    pub fn update<E: Entity>(&mut self, entity: &E) {
        self.pending.push(Change::Update {
            entity: E::NAME,
            table: E::TABLE,
            key: E::KEY,
            id: entity.id(),
            expected_version: entity.row_version(),
            values: entity.values(),
            parent: E::PARENT,
        });
    }

    /// Stage a delete. Dependent rows listed in [`Entity::CHILDREN`] go with it.
    pub fn remove<E: Entity>(&mut self, entity: &E) {
        self.pending.push(Change::Delete {
            entity: E::NAME,
            table: E::TABLE,
            key: E::KEY,
            id: entity.id(),
            cascade: E::CHILDREN,
        });
    }

    /// Commit all staged changes atomically.
    ///
    /// The staged set is cleared whether or not the commit succeeds.
    pub async fn save(&mut self) -> Result<SaveReport, GatewayError> {
        let changes = std::mem::take(&mut self.pending);
        self.staged_inserts = 0;
        if changes.is_empty() {
            return Ok(SaveReport::default());
        }

        tracing::debug!(changes = changes.len(), "Committing staged changes");
        let inserted = self.store.commit(&changes).await?;
        Ok(SaveReport { inserted })
    }

    /// Check that the underlying store is reachable.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        self.store.ping().await
    }
}
