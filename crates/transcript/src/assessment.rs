/// Marker the interviewer is instructed to emit before the machine-readable
/// assessment payload, near the end of the dialogue.
pub const ASSESSMENT_MARKER: &str = "FINAL_ASSESSMENT_JSON:";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Inline assessment embedded in the dialogue by the interviewer.
///
/// Advisory only: the authoritative scoring path is the downstream analysis
/// collaborator triggered during finalization.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPayload {
    pub total_score: f64,
    #[serde(default)]
    pub category_scores: Vec<CategoryScore>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub final_assessment: String,
}

/// Locate the last occurrence of [`ASSESSMENT_MARKER`] in the serialized
/// transcript and parse the JSON object following it.
///
/// Best-effort by contract: a missing marker, a marker with no object after
/// it, or a malformed payload all yield `None` — never an error. Markdown
/// code fences around the object (common in LLM output) are tolerated.
pub fn extract_assessment(transcript: &str) -> Option<AssessmentPayload> {
    let marker_at = transcript.rfind(ASSESSMENT_MARKER)?;
    let tail = &transcript[marker_at + ASSESSMENT_MARKER.len()..];

    let start = tail.find('{')?;
    let end = tail.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&tail[start..=end]).ok()
}
