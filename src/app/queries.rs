use super::*;
use crate::model::Challenge;
use crate::session::AnswerPhase;

impl ChallengeApp {
    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.session.as_ref()?.current_challenge()
    }

    pub fn phase(&self) -> &AnswerPhase {
        &self.phase
    }

    pub fn has_completed_today(&self) -> bool {
        self.stored_completion.is_some()
    }

    /// Visual progress. A checked-but-not-yet-continued challenge already
    /// counts, so the bar moves when the learner sees the verdict, not
    /// when they press continue.
    pub fn progress_fraction(&self) -> f32 {
        let Some(session) = &self.session else {
            return 0.0;
        };
        let total = session.challenges().len();
        if total == 0 {
            return 0.0;
        }
        let done = session.results().len() + usize::from(self.phase.is_checked());
        done as f32 / total as f32
    }

    pub fn progress_label(&self) -> String {
        match &self.session {
            Some(session) => format!(
                "Challenge {} of {}",
                session.current_index() + 1,
                session.challenges().len()
            ),
            None => String::new(),
        }
    }
}
