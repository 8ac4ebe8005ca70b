use crate::events::SessionUiEvent;

/// Host seam for user-facing side effects.
///
/// The embedding application (desktop shell, web bridge, test harness)
/// implements this; the session engine only ever calls it, never the other
/// way around. Implementations must not block.
pub trait SessionRuntime: Send + Sync {
    fn emit(&self, event: SessionUiEvent);

    /// Move the user to the results view for the given session record.
    /// Called as soon as the authoritative record update succeeds, without
    /// waiting for background persistence.
    fn navigate_to_results(&self, session_id: &str);
}
