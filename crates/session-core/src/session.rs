use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::Instrument;
use voxhire_session_interface::{
    CallConfig, CallEvent, Role, SessionKind, SessionRecord, SessionRecordUpdate, SessionStatus,
    TurnRecord,
};
use voxhire_transcript::{InterviewTurn, TranscriptLog, extract_assessment, extract_turns};

use crate::error::{Error, Result};
use crate::events::SessionUiEvent;
use crate::runtime::SessionRuntime;
use crate::store::{IdentityResolver, SessionStore, VoiceControl};

const RECORD_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Ended,
}

/// What the session is attached to. Practice interviews hang off a job
/// application; standalone interviews need a candidate identity resolved at
/// record-creation time.
#[derive(Debug, Clone)]
pub enum SessionAttachment {
    Practice { application_id: String },
    Standalone,
}

#[derive(Debug, Clone, Copy)]
enum CreateTrigger {
    Optimistic,
    Fallback,
}

impl CreateTrigger {
    fn as_str(self) -> &'static str {
        match self {
            CreateTrigger::Optimistic => "optimistic",
            CreateTrigger::Fallback => "fallback",
        }
    }
}

struct Ticker {
    shutdown: tokio::sync::oneshot::Sender<()>,
}

fn session_span(local_id: &str) -> tracing::Span {
    tracing::info_span!("session", session_id = %local_id)
}

/// One live voice-interview call, from start command to finalization.
///
/// Sole owner of the session state, the transcript log, the elapsed-seconds
/// counter, the optimistic-record cell, and the finalization guard. All
/// mutation happens through [`CallSession::handle_event`]; collaborators only
/// ever get called, they never call back in.
pub struct CallSession {
    local_id: String,
    state: SessionState,
    attachment: SessionAttachment,
    log: TranscriptLog,
    /// Set exactly once, synchronously, when finalization begins.
    finalized: bool,
    elapsed_secs: Arc<AtomicU64>,
    /// Two writers across the session lifetime: the optimistic creator task
    /// and, if it never resolved, the fallback creator inside finalization.
    record: Arc<Mutex<Option<SessionRecord>>>,
    assistant_speaking: bool,
    ticker: Option<Ticker>,
    runtime: Arc<dyn SessionRuntime>,
    store: Arc<dyn SessionStore>,
    identity: Arc<dyn IdentityResolver>,
    voice: Arc<dyn VoiceControl>,
}

impl CallSession {
    pub fn new(
        attachment: SessionAttachment,
        runtime: Arc<dyn SessionRuntime>,
        store: Arc<dyn SessionStore>,
        identity: Arc<dyn IdentityResolver>,
        voice: Arc<dyn VoiceControl>,
    ) -> Self {
        Self {
            local_id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::Idle,
            attachment,
            log: TranscriptLog::new(),
            finalized: false,
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            record: Arc::new(Mutex::new(None)),
            assistant_speaking: false,
            ticker: None,
            runtime,
            store,
            identity,
            voice,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_secs.load(Ordering::Relaxed)
    }

    pub fn assistant_speaking(&self) -> bool {
        self.assistant_speaking
    }

    // ── Voice commands ───────────────────────────────────────────────────

    pub async fn start_call(&self, config: &CallConfig) -> Result<()> {
        self.voice
            .start_call(config)
            .await
            .map_err(Error::VoiceCommand)
    }

    pub async fn stop_call(&self) -> Result<()> {
        self.voice.stop_call().await.map_err(Error::VoiceCommand)
    }

    pub async fn set_muted(&self, muted: bool) -> Result<()> {
        self.voice.set_muted(muted).await.map_err(Error::VoiceCommand)
    }

    // ── Event dispatch ───────────────────────────────────────────────────

    /// The single dispatch point for the externally-delivered event stream.
    pub async fn handle_event(&mut self, event: CallEvent) {
        let span = session_span(&self.local_id);
        async {
            match event {
                CallEvent::Started => self.on_started(),
                CallEvent::Transcript {
                    role,
                    text,
                    is_final,
                } => self.on_transcript(role, text, is_final),
                CallEvent::SpeechStarted => self.on_speech(true),
                CallEvent::SpeechEnded => self.on_speech(false),
                CallEvent::Ended => self.on_ended().await,
                CallEvent::Error { cause } => {
                    // Non-fatal: an in-progress call keeps going.
                    tracing::warn!(%cause, "voice_service_error");
                    self.runtime.emit(SessionUiEvent::Error { message: cause });
                }
            }
        }
        .instrument(span)
        .await;
    }

    fn on_started(&mut self) {
        if self.state == SessionState::Active {
            tracing::warn!("session_restarted_while_active");
        }
        self.stop_ticker();

        self.state = SessionState::Active;
        self.log.reset();
        self.finalized = false;
        self.assistant_speaking = false;
        self.elapsed_secs.store(0, Ordering::Relaxed);
        if let Ok(mut cell) = self.record.lock() {
            *cell = None;
        }

        self.start_ticker();
        self.spawn_optimistic_create();

        self.runtime.emit(SessionUiEvent::Active);
        tracing::info!("session_started");
    }

    fn on_transcript(&mut self, role: Role, text: String, is_final: bool) {
        if self.state != SessionState::Active {
            tracing::debug!("transcript_dropped_outside_active_session");
            return;
        }

        if !is_final {
            // Interim hypothesis: shown live, never stored.
            self.runtime.emit(SessionUiEvent::PartialTranscript {
                role,
                content: text,
            });
            return;
        }

        self.log.append(role, text.clone());
        self.runtime.emit(SessionUiEvent::TranscriptAppended {
            role,
            content: text,
        });
    }

    fn on_speech(&mut self, speaking: bool) {
        if self.state != SessionState::Active {
            return;
        }
        self.assistant_speaking = speaking;
        self.runtime
            .emit(SessionUiEvent::AssistantSpeaking { speaking });
    }

    async fn on_ended(&mut self) {
        if self.state != SessionState::Active {
            tracing::debug!("ended_dropped_outside_active_session");
            return;
        }
        self.stop_ticker();
        self.state = SessionState::Ended;
        tracing::info!("session_ended");
        self.finalize().await;
    }

    // ── Elapsed-duration ticker ──────────────────────────────────────────

    fn start_ticker(&mut self) {
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let elapsed = self.elapsed_secs.clone();

        tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval fires immediately; consume that so the counter starts at 0
            tick.tick().await;
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = tick.tick() => {
                        elapsed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });

        self.ticker = Some(Ticker {
            shutdown: shutdown_tx,
        });
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.shutdown.send(());
        }
    }

    // ── Record creation ──────────────────────────────────────────────────

    fn spawn_optimistic_create(&self) {
        let store = self.store.clone();
        let identity = self.identity.clone();
        let attachment = self.attachment.clone();
        let cell = self.record.clone();
        let started_at = Utc::now();
        let span = session_span(&self.local_id);

        tokio::spawn(
            async move {
                match create_session_record(
                    &*store,
                    &*identity,
                    &attachment,
                    started_at,
                    CreateTrigger::Optimistic,
                )
                .await
                {
                    Ok(record) => {
                        tracing::info!(record_id = %record.id, "optimistic_record_created");
                        if let Ok(mut guard) = cell.lock() {
                            *guard = Some(record);
                        }
                    }
                    Err(error) => {
                        // Finalization retries through the fallback path.
                        tracing::warn!(%error, "optimistic_record_create_failed");
                    }
                }
            }
            .instrument(span),
        );
    }

    // ── Finalization pipeline ────────────────────────────────────────────

    /// The one-shot sequence that converts accumulated state into persisted
    /// records: resolve the record, write the authoritative update, then
    /// detach the turn writes and the analysis trigger, then navigate.
    ///
    /// The guard is set synchronously before the first await, so a duplicate
    /// `Ended` delivered while any step is pending observes it and no-ops.
    ///
    /// Accepted race, preserved from the source design: the record cell is
    /// read once and an in-flight optimistic creation is not awaited, so a
    /// call that ends before that creation resolves gets a second,
    /// independent record. Never blocking the user wins over never
    /// duplicating a record.
    async fn finalize(&mut self) {
        if self.finalized {
            tracing::info!("finalize_skipped_already_ran");
            return;
        }
        self.finalized = true;

        let elapsed = self.elapsed_secs.load(Ordering::Relaxed);
        let existing = self
            .record
            .lock()
            .ok()
            .and_then(|guard| (*guard).clone());

        let record = match existing {
            Some(record) => record,
            None => {
                let started_at = Utc::now() - chrono::Duration::seconds(elapsed as i64);
                match create_session_record(
                    &*self.store,
                    &*self.identity,
                    &self.attachment,
                    started_at,
                    CreateTrigger::Fallback,
                )
                .await
                {
                    Ok(record) => record,
                    Err(error) => {
                        tracing::error!(%error, "finalize_record_resolution_failed");
                        self.runtime
                            .emit(SessionUiEvent::Ended { session_id: None });
                        return;
                    }
                }
            }
        };

        let full_transcript = self.log.render();
        let turns = extract_turns(self.log.snapshot());

        if let Some(payload) = extract_assessment(&full_transcript) {
            tracing::info!(total_score = payload.total_score, "inline_assessment_extracted");
            self.runtime
                .emit(SessionUiEvent::InlineAssessment { payload });
        }

        let update = SessionRecordUpdate {
            status: SessionStatus::Processing,
            ended_at: Utc::now(),
            duration_seconds: elapsed,
            full_transcript,
        };

        if let Err(error) = self.store.update_record(&record.id, update).await {
            let error = Error::RecordUpdate(error);
            tracing::error!(%error, "finalize_record_update_failed");
            self.runtime
                .emit(SessionUiEvent::Ended { session_id: None });
            return;
        }

        self.spawn_turn_writes(&record.id, turns);
        self.spawn_analysis_trigger(&record.id);

        tracing::info!(record_id = %record.id, duration_seconds = elapsed, "session_finalized");
        self.runtime.emit(SessionUiEvent::Ended {
            session_id: Some(record.id.clone()),
        });
        self.runtime.navigate_to_results(&record.id);
    }

    fn spawn_turn_writes(&self, record_id: &str, turns: Vec<InterviewTurn>) {
        if turns.is_empty() {
            tracing::info!("no_turns_extracted");
            return;
        }

        let store = self.store.clone();
        let record_id = record_id.to_string();
        let span = session_span(&self.local_id);

        tokio::spawn(
            async move {
                let writes = turns.into_iter().map(|turn| {
                    let store = store.clone();
                    let record_id = record_id.clone();
                    async move {
                        let order_index = turn.order_index;
                        let result = store
                            .create_turn(TurnRecord {
                                session_id: record_id,
                                order_index,
                                question_text: turn.question_text,
                                question_category: turn.question_category,
                                answer_text: turn.answer_text,
                            })
                            .await;
                        (order_index, result)
                    }
                });

                let results = futures_util::future::join_all(writes).await;
                let failed = results.iter().filter(|(_, r)| r.is_err()).count();
                for (order_index, result) in &results {
                    if let Err(error) = result {
                        tracing::warn!(order_index = *order_index, %error, "turn_write_failed");
                    }
                }
                tracing::info!(total = results.len(), failed, "turn_writes_settled");
            }
            .instrument(span),
        );
    }

    fn spawn_analysis_trigger(&self, record_id: &str) {
        let store = self.store.clone();
        let record_id = record_id.to_string();
        let span = session_span(&self.local_id);

        tokio::spawn(
            async move {
                if let Err(error) = store.trigger_analysis(&record_id).await {
                    tracing::warn!(%error, "analysis_trigger_failed");
                }
            }
            .instrument(span),
        );
    }
}

impl Drop for CallSession {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

/// Shared record-creation path for both the optimistic (call start) and
/// fallback (finalization) triggers. Standalone sessions resolve the current
/// candidate first; failure to resolve is fatal to the creation.
async fn create_session_record(
    store: &dyn SessionStore,
    identity: &dyn IdentityResolver,
    attachment: &SessionAttachment,
    started_at: DateTime<Utc>,
    trigger: CreateTrigger,
) -> Result<SessionRecord> {
    let kind = match attachment {
        SessionAttachment::Practice { application_id } => SessionKind::Practice {
            application_id: application_id.clone(),
        },
        SessionAttachment::Standalone => {
            let Some(identity) = identity.resolve_current().await else {
                return Err(Error::IdentityUnresolved);
            };
            SessionKind::Standalone {
                candidate_id: identity.candidate_id,
            }
        }
    };

    let expires_at = started_at + chrono::Duration::days(RECORD_TTL_DAYS);

    tracing::debug!(trigger = trigger.as_str(), "creating_session_record");
    store
        .create_record(&kind, started_at, expires_at)
        .await
        .map_err(Error::RecordCreate)
}

/// Drive a session from an event channel until the host closes it.
///
/// This is the bridge from callback-style voice SDKs: the host forwards each
/// callback as a [`CallEvent`] into the sender and the session consumes them
/// here, one at a time, in delivery order.
pub async fn run_session(
    mut session: CallSession,
    mut events: tokio::sync::mpsc::Receiver<CallEvent>,
) -> CallSession {
    while let Some(event) = events.recv().await {
        session.handle_event(event).await;
    }
    session
}
