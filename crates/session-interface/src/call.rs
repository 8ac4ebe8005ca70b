use crate::common_derives;

common_derives! {
    #[derive(Copy, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        User,
        Assistant,
        System,
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

common_derives! {
    /// One event from the voice collaborator, consumed once by the session
    /// controller. Only `Transcript` with `is_final = true` is durable;
    /// interim hypotheses are forwarded to the UI and then discarded.
    #[serde(tag = "type")]
    pub enum CallEvent {
        #[serde(rename = "callStarted")]
        Started,
        #[serde(rename = "callEnded")]
        Ended,
        #[serde(rename = "transcript")]
        Transcript {
            role: Role,
            text: String,
            #[serde(rename = "isFinal")]
            is_final: bool,
        },
        #[serde(rename = "speechStarted")]
        SpeechStarted,
        #[serde(rename = "speechEnded")]
        SpeechEnded,
        #[serde(rename = "error")]
        Error { cause: String },
    }
}

common_derives! {
    #[serde(rename_all = "lowercase", tag = "mode")]
    pub enum QuestionSource {
        /// The interviewer asks a literal, ordered question list.
        Provided { questions: Vec<String> },
        /// The interviewer generates questions from the role/stack context.
        Generated { count: u32 },
    }
}

common_derives! {
    /// Start-command payload for the voice collaborator.
    #[serde(rename_all = "camelCase")]
    pub struct CallConfig {
        pub candidate_id: String,
        pub candidate_name: String,
        pub role: String,
        pub interview_type: String,
        pub level: String,
        pub tech_stack: Vec<String>,
        pub question_source: QuestionSource,
    }
}

impl CallConfig {
    /// Render the provided question list as `"{n}. {text}"` lines, one per
    /// question. `None` when questions are generated upstream.
    pub fn rendered_questions(&self) -> Option<String> {
        match &self.question_source {
            QuestionSource::Generated { .. } => None,
            QuestionSource::Provided { questions } => Some(
                questions
                    .iter()
                    .enumerate()
                    .map(|(i, q)| format!("{}. {}", i + 1, q.trim()))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }

    pub fn question_count(&self) -> u32 {
        match &self.question_source {
            QuestionSource::Provided { questions } => questions.len() as u32,
            QuestionSource::Generated { count } => *count,
        }
    }
}
