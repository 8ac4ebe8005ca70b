use std::sync::{Arc, Mutex};

use session_core::{
    BoxFuture, CallConfig, CallEvent, CallSession, CollabError, Identity, IdentityResolver,
    QuestionSource, Role, SessionAttachment, SessionKind, SessionRecord, SessionRecordUpdate,
    SessionRuntime, SessionStatus, SessionStore, SessionUiEvent, TurnRecord, VoiceControl,
    run_session,
};

struct CliRuntime;

impl SessionRuntime for CliRuntime {
    fn emit(&self, event: SessionUiEvent) {
        match &event {
            SessionUiEvent::Active => eprintln!("[session] active"),
            SessionUiEvent::AssistantSpeaking { speaking } => {
                eprintln!("[session] assistant speaking={speaking}")
            }
            SessionUiEvent::TranscriptAppended { role, content } => {
                println!("{role}: {content}")
            }
            SessionUiEvent::PartialTranscript { role, content } => {
                eprintln!("[partial] {role}: {content}")
            }
            SessionUiEvent::InlineAssessment { payload } => {
                eprintln!("[assessment] total={}", payload.total_score)
            }
            SessionUiEvent::Error { message } => eprintln!("[error] {message}"),
            SessionUiEvent::Ended { session_id } => {
                eprintln!("[session] ended record={session_id:?}")
            }
        }
    }

    fn navigate_to_results(&self, session_id: &str) {
        eprintln!("[navigate] /interviews/{session_id}/results");
    }
}

#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl SessionStore for MemoryStore {
    fn create_record<'a>(
        &'a self,
        kind: &'a SessionKind,
        started_at: chrono::DateTime<chrono::Utc>,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> BoxFuture<'a, Result<SessionRecord, CollabError>> {
        Box::pin(async move {
            let mut records = self.records.lock().unwrap();
            let record = SessionRecord {
                id: format!("iv_{}", records.len() + 1),
                kind: kind.clone(),
                status: SessionStatus::InProgress,
                started_at,
                expires_at,
            };
            records.push(record.clone());
            Ok(record)
        })
    }

    fn update_record<'a>(
        &'a self,
        id: &'a str,
        update: SessionRecordUpdate,
    ) -> BoxFuture<'a, Result<SessionRecord, CollabError>> {
        Box::pin(async move {
            eprintln!(
                "[store] update {id}: {}s, {} transcript bytes",
                update.duration_seconds,
                update.full_transcript.len()
            );
            let records = self.records.lock().unwrap();
            records
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| "unknown record".into())
        })
    }

    fn create_turn<'a>(&'a self, turn: TurnRecord) -> BoxFuture<'a, Result<(), CollabError>> {
        Box::pin(async move {
            eprintln!(
                "[store] turn {} {}: {}",
                turn.order_index, turn.question_category, turn.question_text
            );
            Ok(())
        })
    }

    fn trigger_analysis<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, Result<(), CollabError>> {
        Box::pin(async move {
            eprintln!("[store] analysis triggered for {session_id}");
            Ok(())
        })
    }
}

struct CliIdentity;

impl IdentityResolver for CliIdentity {
    fn resolve_current(&self) -> BoxFuture<'_, Option<Identity>> {
        Box::pin(async move {
            Some(Identity {
                candidate_id: "cand_cli".into(),
            })
        })
    }
}

struct CliVoice;

impl VoiceControl for CliVoice {
    fn start_call<'a>(&'a self, config: &'a CallConfig) -> BoxFuture<'a, Result<(), CollabError>> {
        Box::pin(async move {
            eprintln!("[voice] start role={} level={}", config.role, config.level);
            if let Some(questions) = config.rendered_questions() {
                eprintln!("[voice] questions:\n{questions}");
            }
            Ok(())
        })
    }

    fn stop_call(&self) -> BoxFuture<'_, Result<(), CollabError>> {
        Box::pin(async move {
            eprintln!("[voice] stop");
            Ok(())
        })
    }

    fn set_muted(&self, muted: bool) -> BoxFuture<'_, Result<(), CollabError>> {
        Box::pin(async move {
            eprintln!("[voice] muted={muted}");
            Ok(())
        })
    }
}

fn scripted_call() -> Vec<CallEvent> {
    let lines: &[(Role, &str, bool)] = &[
        (Role::Assistant, "Hi! Let's get started.", true),
        (Role::Assistant, "Q1: What is ownership in Rust?", true),
        (Role::User, "It's the idea that every value", false),
        (
            Role::User,
            "It's the idea that every value has a single owner.",
            true,
        ),
        (Role::Assistant, "F1: And what happens on move?", true),
        (Role::User, "The old binding becomes invalid.", true),
        (Role::Assistant, "Q2: Explain lifetimes.", true),
        (Role::User, "They bound how long references live.", true),
    ];

    let mut events = vec![CallEvent::Started];
    events.extend(lines.iter().map(|(role, text, is_final)| {
        CallEvent::Transcript {
            role: *role,
            text: text.to_string(),
            is_final: *is_final,
        }
    }));
    events.push(CallEvent::Ended);
    events
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let session = CallSession::new(
        SessionAttachment::Standalone,
        Arc::new(CliRuntime),
        Arc::new(MemoryStore::default()),
        Arc::new(CliIdentity),
        Arc::new(CliVoice),
    );

    let config = CallConfig {
        candidate_id: "cand_cli".into(),
        candidate_name: "CLI Candidate".into(),
        role: "Backend Engineer".into(),
        interview_type: "technical".into(),
        level: "mid".into(),
        tech_stack: vec!["rust".into(), "postgres".into()],
        question_source: QuestionSource::Provided {
            questions: vec![
                "What is ownership in Rust?".into(),
                "Explain lifetimes.".into(),
            ],
        },
    };
    session.start_call(&config).await.expect("start call");

    let (tx, rx) = tokio::sync::mpsc::channel(16);
    let driver = tokio::spawn(run_session(session, rx));

    for event in scripted_call() {
        tx.send(event).await.expect("send event");
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    drop(tx);

    let _ = driver.await;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    eprintln!("Done.");
}
