use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use voxhire_session_interface::{
    CallConfig, Identity, SessionKind, SessionRecord, SessionRecordUpdate, TurnRecord,
};

pub type CollabError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence collaborator for interview records.
///
/// Object-safe via explicit [`BoxFuture`] returns so the session engine can
/// hold it as `Arc<dyn SessionStore>`. Every method is one network call; the
/// engine decides which failures are fatal (record create/update) and which
/// are best-effort (turn writes, analysis trigger).
pub trait SessionStore: Send + Sync {
    fn create_record<'a>(
        &'a self,
        kind: &'a SessionKind,
        started_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> BoxFuture<'a, Result<SessionRecord, CollabError>>;

    fn update_record<'a>(
        &'a self,
        id: &'a str,
        update: SessionRecordUpdate,
    ) -> BoxFuture<'a, Result<SessionRecord, CollabError>>;

    fn create_turn<'a>(&'a self, turn: TurnRecord) -> BoxFuture<'a, Result<(), CollabError>>;

    fn trigger_analysis<'a>(&'a self, session_id: &'a str)
    -> BoxFuture<'a, Result<(), CollabError>>;
}

/// Identity collaborator: who is the current candidate?
///
/// `None` means no resolvable identity — for a standalone session that makes
/// record creation impossible and aborts finalization.
pub trait IdentityResolver: Send + Sync {
    fn resolve_current(&self) -> BoxFuture<'_, Option<Identity>>;
}

/// Command surface of the voice collaborator. Events flow back separately,
/// as [`crate::CallEvent`]s fed into the session dispatch by the host.
pub trait VoiceControl: Send + Sync {
    fn start_call<'a>(&'a self, config: &'a CallConfig)
    -> BoxFuture<'a, Result<(), CollabError>>;

    fn stop_call(&self) -> BoxFuture<'_, Result<(), CollabError>>;

    fn set_muted(&self, muted: bool) -> BoxFuture<'_, Result<(), CollabError>>;
}
