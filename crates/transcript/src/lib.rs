//! # Interview transcript processing
//!
//! Pure, synchronous building blocks for the voice-interview session engine:
//!
//! - [`TranscriptLog`] — the append-only log of finalized utterances and its
//!   plain-text rendering.
//! - [`extract_turns`] — folds the log into structured question/answer turns
//!   by scanning for the `Q{n}:` / `F{n}:` tag protocol the interviewer is
//!   instructed to follow.
//! - [`extract_assessment`] — best-effort lookup of the inline assessment
//!   payload the interviewer may embed at the end of the dialogue.
//!
//! None of these fail: malformed input degrades to empty output.

pub mod assessment;
pub mod log;
pub mod turns;

pub use assessment::{ASSESSMENT_MARKER, AssessmentPayload, CategoryScore, extract_assessment};
pub use log::{TranscriptEntry, TranscriptLog};
pub use turns::{InterviewTurn, extract_turns};
