//! # Call-session engine
//!
//! The state machine that drives one live voice-interview call end-to-end:
//! it consumes [`CallEvent`]s from the voice collaborator, accumulates the
//! final transcript, and — exactly once per session — runs the finalization
//! pipeline that persists the interview record, its turns, and the analysis
//! trigger.
//!
//! The embedding host provides the collaborators: a [`SessionRuntime`] for
//! UI-facing emission and navigation, a [`SessionStore`] + [`IdentityResolver`]
//! for persistence, and a [`VoiceControl`] for commands back to the voice
//! service.

mod error;
mod events;
mod runtime;
mod session;
mod store;

pub use error::{Error, Result};
pub use events::SessionUiEvent;
pub use runtime::SessionRuntime;
pub use session::{CallSession, SessionAttachment, SessionState, run_session};
pub use store::{BoxFuture, CollabError, IdentityResolver, SessionStore, VoiceControl};

pub use voxhire_session_interface::{
    CallConfig, CallEvent, Identity, QuestionSource, Role, SessionKind, SessionRecord,
    SessionRecordUpdate, SessionStatus, TurnRecord,
};
