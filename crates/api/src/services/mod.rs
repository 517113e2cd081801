//! Request-level operations over the persistence gateway.
//!
//! Each service is a unit struct with associated async functions that take the
//! request's [`Session`]: `&Session` for reads, `&mut Session` for anything
//! that stages and saves changes. Validation always runs before anything is
//! staged, so a rejected input never reaches the store.

pub mod project;
pub mod project_comment;
pub mod project_task;

use projecthub_core::error::CoreError;
use projecthub_core::types::DbId;
use projecthub_db::gateway::{Entity, GatewayError, Session};

use crate::error::AppError;

pub use project::ProjectService;
pub use project_comment::ProjectCommentService;
pub use project_task::ProjectTaskService;

/// Fetch `E` by id or fail with [`CoreError::NotFound`].
pub(crate) async fn require<E: Entity>(session: &Session, id: DbId) -> Result<E, AppError> {
    session
        .find_by_id::<E>(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: E::NAME, id }))
}

/// Turn a failed update save into the error the caller should see.
///
/// A stale write is re-checked against the store: if the row is gone the
/// update reports not-found, otherwise another request won the race and the
/// update reports a conflict.
pub(crate) async fn resolve_update_failure<E: Entity>(
    session: &Session,
    id: DbId,
    err: GatewayError,
) -> AppError {
    if !matches!(err, GatewayError::StaleWrite { .. }) {
        return err.into();
    }
    match session.exists::<E>(id).await {
        Ok(false) => CoreError::NotFound { entity: E::NAME, id }.into(),
        Ok(true) => {
            tracing::warn!(entity = E::NAME, id, "Concurrent update rejected");
            CoreError::Conflict(format!(
                "{} with id {id} was changed by another request; reload and try again",
                E::NAME
            ))
            .into()
        }
        Err(e) => e.into(),
    }
}

/// Turn a failed delete save into the error the caller should see.
///
/// A delete only goes stale when the row vanished first.
pub(crate) fn resolve_delete_failure<E: Entity>(id: DbId, err: GatewayError) -> AppError {
    match err {
        GatewayError::StaleWrite { .. } => CoreError::NotFound { entity: E::NAME, id }.into(),
        other => other.into(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use projecthub_db::gateway::{Change, MemoryStore, Record, Select, Store};

    use super::*;

    /// Store whose next commit loses a race: `rival` is committed first, then
    /// the caller's changes run against the result.
    pub struct RivalWriteStore {
        inner: Arc<MemoryStore>,
        rival: Mutex<Option<Change>>,
    }

    impl RivalWriteStore {
        /// The next commit finds `entity` already deleted by someone else.
        pub fn deleting<E: Entity>(inner: Arc<MemoryStore>, entity: &E) -> Self {
            let rival = Change::Delete {
                entity: E::NAME,
                table: E::TABLE,
                key: E::KEY,
                id: entity.id(),
                cascade: E::CHILDREN,
            };
            Self {
                inner,
                rival: Mutex::new(Some(rival)),
            }
        }
    }

    #[async_trait]
    impl Store for RivalWriteStore {
        async fn select(&self, select: &Select) -> Result<Vec<Record>, GatewayError> {
            self.inner.select(select).await
        }

        async fn commit(&self, changes: &[Change]) -> Result<Vec<DbId>, GatewayError> {
            let rival = self.rival.lock().unwrap().take();
            if let Some(rival) = rival {
                self.inner.commit(&[rival]).await?;
            }
            self.inner.commit(changes).await
        }

        async fn ping(&self) -> Result<(), GatewayError> {
            self.inner.ping().await
        }
    }

    /// Session over `inner` in which the `E` row `id` disappears right before
    /// the session's first save.
    pub async fn session_losing<E: Entity>(inner: Arc<MemoryStore>, id: DbId) -> Session {
        let victim = Session::new(inner.clone())
            .find_by_id::<E>(id)
            .await
            .unwrap()
            .unwrap();
        Session::new(Arc::new(RivalWriteStore::deleting(inner, &victim)))
    }
}
