//! The run-state of one attempt at a daily set, plus the small
//! check/continue sub-state machine the challenge view drives.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::evaluator;
use crate::model::{
    Challenge, ChallengeResult, CompletionRecord, CompletionStats, DailyChallenge, SubmittedAnswer,
};

/// Injected time source so the session stays testable without real time.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("daily challenge for {0} has no challenges")]
    EmptySet(String),
}

/// In-memory state machine for one attempt. Constructed straight into
/// "in progress"; `record_result` is the only mutating transition. The
/// session is transient: once a [`CompletionRecord`] has been built and
/// handed to the store, it is discarded.
pub struct ChallengeSession {
    date: String,
    challenges: Vec<Challenge>,
    results: Vec<ChallengeResult>,
    current_index: usize,
    total_score: u32,
    complete: bool,
    start_time_ms: i64,
    end_time_ms: Option<i64>,
}

impl ChallengeSession {
    pub fn new(daily: DailyChallenge, clock: &dyn Clock) -> Result<Self, SessionError> {
        if daily.challenges.is_empty() {
            return Err(SessionError::EmptySet(daily.date));
        }
        Ok(Self {
            date: daily.date,
            challenges: daily.challenges,
            results: Vec::new(),
            current_index: 0,
            total_score: 0,
            complete: false,
            start_time_ms: clock.now_ms(),
            end_time_ms: None,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn results(&self) -> &[ChallengeResult] {
        &self.results
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The challenge waiting for an answer, or `None` once the set is done.
    pub fn current_challenge(&self) -> Option<&Challenge> {
        if self.complete {
            None
        } else {
            self.challenges.get(self.current_index)
        }
    }

    /// Appends the result for the current challenge, updates the score and
    /// advances. The index never moves past the last valid position; the
    /// final call flips `is_complete` instead. Calling again after
    /// completion is a no-op.
    pub fn record_result(
        &mut self,
        user_answer: SubmittedAnswer,
        is_correct: bool,
        clock: &dyn Clock,
    ) {
        if self.complete {
            return;
        }
        let current = &self.challenges[self.current_index];
        let points_earned = if is_correct { current.points } else { 0 };
        // Coarse session-wide elapsed time, not a per-challenge timer.
        let time_spent_secs = ((clock.now_ms() - self.start_time_ms).max(0) / 1000) as u64;

        self.results.push(ChallengeResult {
            challenge_id: current.id.clone(),
            user_answer,
            is_correct,
            points_earned,
            time_spent_secs,
        });
        self.total_score += points_earned;

        if self.current_index == self.challenges.len() - 1 {
            self.complete = true;
            self.end_time_ms = Some(clock.now_ms());
        } else {
            self.current_index += 1;
        }
    }

    pub fn stats(&self) -> CompletionStats {
        let correct_answers = self.results.iter().filter(|r| r.is_correct).count() as u32;
        CompletionStats {
            total_score: self.total_score,
            correct_answers,
            total_challenges: self.challenges.len() as u32,
            accuracy: accuracy_percent(correct_answers, self.challenges.len() as u32),
            time_spent_secs: self.elapsed_secs(),
            correct_challenge_ids: self
                .results
                .iter()
                .filter(|r| r.is_correct)
                .map(|r| r.challenge_id.clone())
                .collect(),
        }
    }

    /// The durable aggregate for this attempt. `None` until every
    /// challenge has been answered.
    pub fn completion_record(&self) -> Option<CompletionRecord> {
        if !self.complete {
            return None;
        }
        let stats = self.stats();
        let completed_at = self
            .end_time_ms
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now);
        Some(CompletionRecord {
            date: self.date.clone(),
            completed_at,
            total_score: stats.total_score,
            correct_answers: stats.correct_answers,
            total_challenges: stats.total_challenges,
            accuracy: stats.accuracy,
            time_spent_secs: stats.time_spent_secs,
            challenge_ids: self.challenges.iter().map(|c| c.id.clone()).collect(),
            correct_challenge_ids: stats.correct_challenge_ids,
        })
    }

    fn elapsed_secs(&self) -> u64 {
        let end = self.end_time_ms.unwrap_or(self.start_time_ms);
        ((end - self.start_time_ms).max(0) / 1000) as u64
    }
}

pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(correct) / f64::from(total)).round() as u32
}

/// Per-challenge interaction state: capture an answer, check it (feedback
/// shown, answer locked), then continue (record + reset). Keeping this a
/// single enum instead of loose booleans means the view cannot get the
/// check/continue gates out of sync.
pub enum AnswerPhase {
    AwaitingAnswer { draft: Option<SubmittedAnswer> },
    Checked { answer: SubmittedAnswer, correct: bool },
}

impl Default for AnswerPhase {
    fn default() -> Self {
        AnswerPhase::AwaitingAnswer { draft: None }
    }
}

impl AnswerPhase {
    pub fn has_answer(&self) -> bool {
        match self {
            AnswerPhase::AwaitingAnswer { draft } => {
                draft.as_ref().is_some_and(|a| !a.is_empty())
            }
            AnswerPhase::Checked { .. } => true,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, AnswerPhase::Checked { .. })
    }

    /// The answer currently on screen, checked or not.
    pub fn answer(&self) -> Option<&SubmittedAnswer> {
        match self {
            AnswerPhase::AwaitingAnswer { draft } => draft.as_ref(),
            AnswerPhase::Checked { answer, .. } => Some(answer),
        }
    }

    pub fn checked_correct(&self) -> Option<bool> {
        match self {
            AnswerPhase::Checked { correct, .. } => Some(*correct),
            AnswerPhase::AwaitingAnswer { .. } => None,
        }
    }

    /// Replaces the draft. Ignored once checked: the answer is locked
    /// until the next challenge resets the phase.
    pub fn set_draft(&mut self, answer: SubmittedAnswer) {
        if let AnswerPhase::AwaitingAnswer { draft } = self {
            *draft = Some(answer);
        }
    }

    /// Appends a word-bank token to an ordered draft.
    pub fn push_token(&mut self, token: &str) {
        if let AnswerPhase::AwaitingAnswer { draft } = self {
            match draft {
                Some(SubmittedAnswer::Tokens(tokens)) => tokens.push(token.to_owned()),
                _ => *draft = Some(SubmittedAnswer::Tokens(vec![token.to_owned()])),
            }
        }
    }

    /// Removes one token from an ordered draft by position.
    pub fn remove_token(&mut self, index: usize) {
        if let AnswerPhase::AwaitingAnswer {
            draft: Some(SubmittedAnswer::Tokens(tokens)),
        } = self
            && index < tokens.len()
        {
            tokens.remove(index);
        }
    }

    /// Evaluates the draft against `challenge` and moves to `Checked`.
    /// Returns the verdict exactly once per check; gated on a non-empty
    /// draft, so calling it from a disabled button path is a no-op.
    pub fn check(&mut self, challenge: &Challenge) -> Option<bool> {
        if !self.has_answer() || self.is_checked() {
            return None;
        }
        let AnswerPhase::AwaitingAnswer { draft } = self else {
            return None;
        };
        let answer = draft.take()?;
        let correct = evaluator::is_correct(challenge, &answer);
        *self = AnswerPhase::Checked { answer, correct };
        Some(correct)
    }

    /// Consumes the checked verdict for `record_result` and resets the
    /// phase so the next challenge starts clean. Before check this is a
    /// no-op: the draft stays untouched.
    pub fn take_checked(&mut self) -> Option<(SubmittedAnswer, bool)> {
        if !self.is_checked() {
            return None;
        }
        match std::mem::take(self) {
            AnswerPhase::Checked { answer, correct } => Some((answer, correct)),
            AnswerPhase::AwaitingAnswer { .. } => None,
        }
    }
}
