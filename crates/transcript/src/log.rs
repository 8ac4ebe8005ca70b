use voxhire_session_interface::Role;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

/// Append-only ordered log of finalized utterances.
///
/// Entries are never mutated, removed, or reordered once appended; sequence is
/// implicit in the index. The log is cleared only by [`TranscriptLog::reset`],
/// which the session controller calls on call start — never mid-session.
#[derive(Debug, Default)]
pub struct TranscriptLog {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role,
            content: content.into(),
        });
    }

    pub fn snapshot(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text rendering persisted as the session's `fullTranscript`:
    /// one `"{role}: {content}"` line per entry, in log order, with blank
    /// entries dropped.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .filter(|e| !e.content.trim().is_empty())
            .map(|e| format!("{}: {}", e.role, e.content.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
