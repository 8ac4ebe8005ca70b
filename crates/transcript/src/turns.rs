use std::sync::LazyLock;

use regex::Regex;
use voxhire_session_interface::Role;

use crate::log::TranscriptEntry;

/// A main question plus its concatenated spoken answer.
///
/// `order_index` counts main questions only, starting at 1; follow-ups never
/// advance it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterviewTurn {
    pub order_index: u32,
    pub question_text: String,
    pub question_category: String,
    pub answer_text: String,
}

// `Q3: ...` or `f12 : ...` — prefix letter, digits, optional whitespace, colon.
static QUESTION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([QqFf])(\d+)\s*:\s*(.*)$").unwrap());

/// Fold the transcript log into ordered interview turns.
///
/// Single left-to-right scan, no backtracking. A `Q{n}:` assistant line closes
/// the current turn and opens the next; an `F{n}:` follow-up line closes the
/// current turn without opening one, so speech that answers a follow-up is
/// never attributed to the preceding main question. Assistant
/// lines without a recognized tag are ignored, as is user speech before the
/// first recognized question. Turns whose question text is empty are dropped.
///
/// This is deliberately a line-tag parser, not a language segmenter: when the
/// interviewer does not follow the tag convention it produces zero turns
/// rather than failing.
pub fn extract_turns(entries: &[TranscriptEntry]) -> Vec<InterviewTurn> {
    let mut turns: Vec<InterviewTurn> = Vec::new();
    let mut current: Option<InterviewTurn> = None;
    let mut order_counter = 0u32;

    for entry in entries {
        match entry.role {
            Role::Assistant => {
                let Some(caps) = QUESTION_TAG.captures(entry.content.trim()) else {
                    continue;
                };

                let prefix = &caps[1];
                if let Some(turn) = current.take() {
                    turns.push(turn);
                }
                if prefix.eq_ignore_ascii_case("f") {
                    // Follow-up: closes the open turn but never starts one,
                    // and its text is kept nowhere.
                    continue;
                }
                order_counter += 1;
                current = Some(InterviewTurn {
                    order_index: order_counter,
                    question_text: caps[3].trim().to_string(),
                    question_category: format!("{}{}", prefix, &caps[2]),
                    answer_text: String::new(),
                });
            }
            Role::User => {
                let Some(turn) = current.as_mut() else {
                    continue;
                };
                let content = entry.content.trim();
                if content.is_empty() {
                    continue;
                }
                if !turn.answer_text.is_empty() {
                    turn.answer_text.push('\n');
                }
                turn.answer_text.push_str(content);
            }
            Role::System => {}
        }
    }

    if let Some(turn) = current.take() {
        turns.push(turn);
    }

    turns.retain(|t| !t.question_text.is_empty());
    turns
}
