//! Persistence gateway.
//!
//! Entities describe their table through the [`Entity`] trait and convert to
//! and from a backend-neutral [`Record`]. A [`Store`] executes reads
//! ([`Select`]) and commits batches of staged [`Change`]s atomically. Request
//! handlers never talk to a store directly; they go through a [`Session`],
//! which stages mutations until [`Session::save`] is called.

use async_trait::async_trait;
use projecthub_core::types::DbId;

pub mod memory;
pub mod postgres;
pub mod query;
mod record;
mod session;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use query::{Direction, Filter, Order, Query, Select};
pub use record::{Record, Value};
pub use session::{SaveReport, Session, Staged};

// ---------------------------------------------------------------------------
// Table metadata
// ---------------------------------------------------------------------------

/// Storage type of a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    BigInt,
    Text,
    NullableText,
    Timestamp,
}

/// A data column (the primary key and `row_version` are implicit).
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// A foreign-key link between two tables.
///
/// Used as [`Entity::PARENT`] (the referenced table and the local FK column)
/// and in [`Entity::CHILDREN`] (a dependent table and its FK column).
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub table: &'static str,
    pub column: &'static str,
}

/// Every table carries this optimistic concurrency column.
pub const ROW_VERSION: &str = "row_version";

/// A persisted record type.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Primary key column.
    const KEY: &'static str;
    /// Data columns, excluding the key and `row_version`.
    const COLUMNS: &'static [Column];
    /// Table this entity must reference, if any.
    const PARENT: Option<Relation> = None;
    /// Tables whose rows are removed together with this entity.
    const CHILDREN: &'static [Relation] = &[];

    fn id(&self) -> DbId;

    fn row_version(&self) -> i32;

    /// Current data column values, in [`Entity::COLUMNS`] order.
    fn values(&self) -> Vec<(&'static str, Value)>;

    fn from_record(record: &Record) -> Result<Self, GatewayError>;
}

// ---------------------------------------------------------------------------
// Staged changes
// ---------------------------------------------------------------------------

/// A mutation waiting for [`Session::save`].
#[derive(Debug, Clone)]
pub enum Change {
    Insert {
        entity: &'static str,
        table: &'static str,
        key: &'static str,
        values: Vec<(&'static str, Value)>,
        parent: Option<Relation>,
    },
    Update {
        entity: &'static str,
        table: &'static str,
        key: &'static str,
        id: DbId,
        expected_version: i32,
        values: Vec<(&'static str, Value)>,
        parent: Option<Relation>,
    },
    Delete {
        entity: &'static str,
        table: &'static str,
        key: &'static str,
        id: DbId,
        cascade: &'static [Relation],
    },
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// An update or delete matched no row: either the row is gone or its
    /// `row_version` moved on since it was loaded.
    #[error("Stale write: {entity} with id {id} was changed or removed by another writer")]
    StaleWrite { entity: &'static str, id: DbId },

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Backend that executes reads and atomic commits.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run a read query and return matching rows in the requested order.
    async fn select(&self, select: &Select) -> Result<Vec<Record>, GatewayError>;

    /// Apply `changes` as one unit. Returns the generated identities of the
    /// `Insert` changes, in staging order. Nothing is applied on error.
    async fn commit(&self, changes: &[Change]) -> Result<Vec<DbId>, GatewayError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), GatewayError>;
}
