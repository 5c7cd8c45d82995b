use std::sync::mpsc;
use std::thread;

use super::*;
use crate::model::SubmittedAnswer;

impl ChallengeApp {
    /// Kicks off the fetch of today's set on a background thread. The UI
    /// stays in Loading until [`ChallengeApp::poll_fetch`] sees the result.
    pub fn start_daily(&mut self) {
        let (tx, rx) = mpsc::channel();
        let date = self.today.clone();
        self.fetch_rx = Some(rx);
        self.state = AppState::Loading;
        self.message.clear();
        thread::spawn(move || {
            let result = data::daily_challenge_for(&date);
            let _ = tx.send(result);
        });
    }

    /// Called every frame; drains the pending fetch if it has finished.
    /// A fetch thread that died without sending counts as a failure, so
    /// the app cannot sit in Loading forever.
    pub fn poll_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else { return };
        match rx.try_recv() {
            Ok(result) => {
                self.fetch_rx = None;
                self.apply_fetch_result(result);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                log::warn!("daily challenge fetch ended without a result");
                self.message = "The challenge download was interrupted.".to_owned();
                self.state = AppState::Unavailable;
            }
        }
    }

    pub(crate) fn apply_fetch_result(&mut self, result: Result<DailyChallenge, DataError>) {
        let daily = match result {
            Ok(daily) => daily,
            Err(err) => {
                log::warn!("daily challenge fetch failed: {err}");
                self.message = err.to_string();
                self.state = AppState::Unavailable;
                return;
            }
        };
        match ChallengeSession::new(daily, self.clock.as_ref()) {
            Ok(session) => {
                self.session = Some(session);
                self.phase = AnswerPhase::default();
                self.state = AppState::Challenge;
            }
            Err(err) => {
                log::warn!("could not start session: {err}");
                self.message = err.to_string();
                self.state = AppState::Unavailable;
            }
        }
    }

    // Answer capture. All three delegate to the phase, which ignores
    // edits once the answer has been checked.

    pub fn select_choice(&mut self, option: &str) {
        self.phase
            .set_draft(SubmittedAnswer::Choice(option.to_owned()));
    }

    pub fn push_token(&mut self, token: &str) {
        self.phase.push_token(token);
    }

    pub fn remove_token(&mut self, index: usize) {
        self.phase.remove_token(index);
    }

    /// Phase "check": grade the captured answer and show feedback. The
    /// phase returns the verdict at most once, so the correctness cue
    /// cannot re-fire on a re-render.
    pub fn check_answer(&mut self) {
        let Some(session) = &self.session else { return };
        let Some(challenge) = session.current_challenge() else {
            return;
        };
        if let Some(correct) = self.phase.check(challenge) {
            self.message = if correct {
                "✅ Correct!".to_owned()
            } else {
                "❌ Not quite.".to_owned()
            };
        }
    }

    /// Phase "continue": record the checked answer, advance, and reset
    /// the capture state. Finishing the last challenge persists the
    /// completion and moves to the summary.
    pub fn continue_next(&mut self) {
        let Some((answer, correct)) = self.phase.take_checked() else {
            return;
        };
        let Some(session) = &mut self.session else { return };
        session.record_result(answer, correct, self.clock.as_ref());
        self.message.clear();
        if session.is_complete() {
            self.finish_session();
        }
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.take() else { return };
        if let Some(record) = session.completion_record() {
            // Best-effort write; the in-memory record still backs the
            // summary even if persisting failed.
            self.store.save(&record);
            self.stored_completion = Some(record);
        }
        self.phase = AnswerPhase::default();
        self.state = AppState::Summary;
    }

    pub fn view_results(&mut self) {
        if self.stored_completion.is_some() {
            self.state = AppState::Summary;
        }
    }

    pub fn retry_fetch(&mut self) {
        self.start_daily();
    }

    pub fn back_to_welcome(&mut self) {
        self.state = AppState::Welcome;
        self.message.clear();
    }

    /// Dev-only: wipe stored completions and start over.
    #[cfg(debug_assertions)]
    pub fn reset_all_completions(&mut self) {
        self.store.clear();
        self.stored_completion = None;
        self.session = None;
        self.phase = AnswerPhase::default();
        self.state = AppState::Welcome;
        self.message = "🔄 Completion history cleared.".to_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Challenge, ChallengeType, CorrectAnswer, Difficulty};
    use crate::store::MemoryStorage;

    struct FrozenClock(i64);

    impl Clock for FrozenClock {
        fn now_ms(&self) -> i64 {
            self.0
        }
    }

    fn app() -> ChallengeApp {
        ChallengeApp::with_parts(
            CompletionStore::new(Box::new(MemoryStorage::default())),
            Box::new(FrozenClock(1_000_000)),
            "2026-08-24".to_owned(),
        )
    }

    fn daily() -> DailyChallenge {
        let choice = |id: &str, answer: &str| Challenge {
            id: id.into(),
            challenge_type: ChallengeType::MultipleChoice,
            question: "?".into(),
            correct_answer: CorrectAnswer::Choice(answer.into()),
            options: Some(vec![answer.into(), "moto".into()]),
            word_bank: None,
            audio_url: None,
            explanation: None,
            difficulty: Difficulty::Beginner,
            points: 10,
        };
        DailyChallenge {
            date: "2026-08-24".into(),
            challenges: vec![choice("a", "mvura"), choice("b", "imbwa")],
            total_points: 20,
            estimated_time: 1,
        }
    }

    #[test]
    fn failed_fetch_lands_in_unavailable() {
        let mut app = app();
        app.apply_fetch_result(Err(DataError::EmptyBank));
        assert_eq!(app.state, AppState::Unavailable);
        assert!(!app.message.is_empty());
        assert!(app.session.is_none());
    }

    #[test]
    fn empty_set_never_enters_a_session() {
        let mut app = app();
        let empty = DailyChallenge {
            date: "2026-08-24".into(),
            challenges: vec![],
            total_points: 0,
            estimated_time: 0,
        };
        app.apply_fetch_result(Ok(empty));
        assert_eq!(app.state, AppState::Unavailable);
        assert!(app.session.is_none());
    }

    #[test]
    fn check_continue_flow_completes_and_persists() {
        let mut app = app();
        app.apply_fetch_result(Ok(daily()));
        assert_eq!(app.state, AppState::Challenge);

        // Continue before check is a no-op.
        app.continue_next();
        assert_eq!(app.session.as_ref().unwrap().results().len(), 0);

        app.select_choice("mvura");
        app.check_answer();
        assert_eq!(app.message, "✅ Correct!");
        app.continue_next();
        assert_eq!(app.state, AppState::Challenge);

        app.select_choice("moto");
        app.check_answer();
        assert_eq!(app.message, "❌ Not quite.");
        app.continue_next();

        assert_eq!(app.state, AppState::Summary);
        assert!(app.session.is_none(), "session is discarded after completion");

        let record = app.store.load("2026-08-24").expect("completion persisted");
        assert_eq!(record.total_score, 10);
        assert_eq!(record.accuracy, 50);
        assert_eq!(record.correct_challenge_ids, vec!["a"]);
        assert_eq!(app.stored_completion.as_ref(), Some(&record));
    }

    #[test]
    fn dead_fetch_channel_lands_in_unavailable() {
        let mut app = app();
        let (tx, rx) = mpsc::channel();
        app.fetch_rx = Some(rx);
        app.state = AppState::Loading;

        // Sender alive but nothing delivered yet: keep loading.
        app.poll_fetch();
        assert_eq!(app.state, AppState::Loading);

        drop(tx);
        app.poll_fetch();
        assert_eq!(app.state, AppState::Unavailable);
        assert!(app.fetch_rx.is_none());
        assert!(!app.message.is_empty());
    }

    #[test]
    fn checking_without_an_answer_does_nothing() {
        let mut app = app();
        app.apply_fetch_result(Ok(daily()));
        app.check_answer();
        assert!(app.message.is_empty());
        assert!(!app.phase.is_checked());
    }

    #[test]
    fn progress_counts_the_checked_challenge_early() {
        let mut app = app();
        app.apply_fetch_result(Ok(daily()));
        assert_eq!(app.progress_fraction(), 0.0);

        app.select_choice("mvura");
        assert_eq!(app.progress_fraction(), 0.0);
        app.check_answer();
        assert_eq!(app.progress_fraction(), 0.5);
        app.continue_next();
        assert_eq!(app.progress_fraction(), 0.5);
    }
}
