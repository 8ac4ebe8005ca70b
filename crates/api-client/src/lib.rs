//! reqwest client for the interview-platform backend.
//!
//! Implements the persistence and identity collaborator seams of
//! `voxhire-session-core` ([`SessionStore`], [`IdentityResolver`]) over the
//! platform's REST API.

mod client;
mod error;

pub use client::{ApiClient, ApiClientBuilder};
pub use error::{Error, Result};

use voxhire_session_core::{
    BoxFuture, CollabError, IdentityResolver, SessionStore,
};
use voxhire_session_interface::{
    Identity, SessionKind, SessionRecord, SessionRecordUpdate, TurnRecord,
};

impl SessionStore for ApiClient {
    fn create_record<'a>(
        &'a self,
        kind: &'a SessionKind,
        started_at: chrono::DateTime<chrono::Utc>,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> BoxFuture<'a, std::result::Result<SessionRecord, CollabError>> {
        Box::pin(async move {
            self.create_interview(kind, started_at, expires_at)
                .await
                .map_err(Into::into)
        })
    }

    fn update_record<'a>(
        &'a self,
        id: &'a str,
        update: SessionRecordUpdate,
    ) -> BoxFuture<'a, std::result::Result<SessionRecord, CollabError>> {
        Box::pin(async move { self.update_interview(id, &update).await.map_err(Into::into) })
    }

    fn create_turn<'a>(
        &'a self,
        turn: TurnRecord,
    ) -> BoxFuture<'a, std::result::Result<(), CollabError>> {
        Box::pin(async move { self.create_interview_turn(&turn).await.map_err(Into::into) })
    }

    fn trigger_analysis<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, std::result::Result<(), CollabError>> {
        Box::pin(async move {
            self.trigger_interview_analysis(session_id)
                .await
                .map_err(Into::into)
        })
    }
}

impl IdentityResolver for ApiClient {
    fn resolve_current(&self) -> BoxFuture<'_, Option<Identity>> {
        Box::pin(async move {
            match self.current_identity().await {
                Ok(identity) => identity,
                Err(error) => {
                    tracing::warn!(%error, "identity_lookup_failed");
                    None
                }
            }
        })
    }
}
