//! Per-request unit-of-work extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use projecthub_db::gateway::Session;

use crate::state::AppState;

/// A fresh [`Session`] opened for the current request and dropped with it.
///
/// Anything staged but not saved when the handler returns is discarded.
pub struct UnitOfWork(pub Session);

impl FromRequestParts<AppState> for UnitOfWork {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(UnitOfWork(state.session()))
    }
}
