use chrono::{DateTime, Utc};

use crate::common_derives;

common_derives! {
    #[serde(rename_all = "lowercase", tag = "kind")]
    pub enum SessionKind {
        /// Interview attached to a job application.
        Practice {
            #[serde(rename = "applicationId")]
            application_id: String,
        },
        /// Standalone interview owned directly by a candidate.
        Standalone {
            #[serde(rename = "candidateId")]
            candidate_id: String,
        },
    }
}

common_derives! {
    #[derive(Copy, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum SessionStatus {
        InProgress,
        Processing,
        Completed,
    }
}

common_derives! {
    /// The backing interview record, owned by the persistence collaborator.
    #[serde(rename_all = "camelCase")]
    pub struct SessionRecord {
        pub id: String,
        #[serde(flatten)]
        pub kind: SessionKind,
        pub status: SessionStatus,
        pub started_at: DateTime<Utc>,
        pub expires_at: DateTime<Utc>,
    }
}

common_derives! {
    /// The authoritative end-of-session update (finalization step 4).
    #[serde(rename_all = "camelCase")]
    pub struct SessionRecordUpdate {
        pub status: SessionStatus,
        pub ended_at: DateTime<Utc>,
        pub duration_seconds: u64,
        pub full_transcript: String,
    }
}

common_derives! {
    #[serde(rename_all = "camelCase")]
    pub struct TurnRecord {
        pub session_id: String,
        pub order_index: u32,
        pub question_text: String,
        pub question_category: String,
        pub answer_text: String,
    }
}

common_derives! {
    #[serde(rename_all = "camelCase")]
    pub struct Identity {
        pub candidate_id: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_record_roundtrips_with_flattened_kind() {
        let record = SessionRecord {
            id: "iv_1".into(),
            kind: SessionKind::Practice {
                application_id: "app_9".into(),
            },
            status: SessionStatus::InProgress,
            started_at: Utc::now(),
            expires_at: Utc::now(),
        };

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "practice");
        assert_eq!(json["applicationId"], "app_9");
        assert_eq!(json["status"], "in_progress");

        let back: SessionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
