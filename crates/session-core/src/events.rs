use voxhire_session_interface::Role;
use voxhire_transcript::AssessmentPayload;

/// UI-facing session events, emitted through [`crate::SessionRuntime`].
///
/// These exist for live display only; none of them feed back into the state
/// machine or the finalization pipeline.
#[derive(Debug, Clone, serde::Serialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum SessionUiEvent {
    #[serde(rename = "sessionActive")]
    Active,
    #[serde(rename = "assistantSpeaking")]
    AssistantSpeaking { speaking: bool },
    #[serde(rename = "transcriptAppended")]
    TranscriptAppended { role: Role, content: String },
    /// Interim hypothesis — displayed, never stored.
    #[serde(rename = "partialTranscript")]
    PartialTranscript { role: Role, content: String },
    #[serde(rename = "inlineAssessment")]
    InlineAssessment { payload: AssessmentPayload },
    /// Voice-service error. Informational; the call itself keeps going.
    #[serde(rename = "sessionError")]
    Error { message: String },
    #[serde(rename = "sessionEnded")]
    Ended { session_id: Option<String> },
}
