use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::data::{self, DataError};
use crate::model::{AppState, CompletionRecord, DailyChallenge};
use crate::session::{AnswerPhase, ChallengeSession, Clock, SystemClock};
use crate::store::{CompletionStore, FileStorage};

pub mod actions;
pub mod queries;
pub mod view_models;

const STORAGE_FILE: &str = "shona_daily_completions.json";

pub struct ChallengeApp {
    pub state: AppState,
    pub message: String,
    /// Today's date, YYYY-MM-DD. Fixed at startup; the whole app drives
    /// one date at a time.
    pub today: String,
    /// The in-flight attempt. `None` outside the Challenge state.
    pub(crate) session: Option<ChallengeSession>,
    /// Check/continue sub-state for the challenge on screen.
    pub(crate) phase: AnswerPhase,
    /// Today's persisted completion, if any. Also holds the record of a
    /// just-finished session, so the summary view has a single source.
    pub(crate) stored_completion: Option<CompletionRecord>,
    pub(crate) store: CompletionStore,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) fetch_rx: Option<Receiver<Result<DailyChallenge, DataError>>>,
}

impl ChallengeApp {
    pub fn new() -> Self {
        let storage = FileStorage::open(PathBuf::from(STORAGE_FILE));
        Self::with_parts(
            CompletionStore::new(Box::new(storage)),
            Box::new(SystemClock),
            data::today(),
        )
    }

    /// Constructor with injected collaborators, used by tests.
    pub fn with_parts(store: CompletionStore, clock: Box<dyn Clock>, today: String) -> Self {
        let stored_completion = store.load(&today);
        Self {
            state: AppState::Welcome,
            message: String::new(),
            today,
            session: None,
            phase: AnswerPhase::default(),
            stored_completion,
            store,
            clock,
            fetch_rx: None,
        }
    }
}

impl Default for ChallengeApp {
    fn default() -> Self {
        Self::new()
    }
}
