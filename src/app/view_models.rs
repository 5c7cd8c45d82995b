use super::*;
use crate::model::CompletionStats;
use crate::view_models::SummaryRow;

impl ChallengeApp {
    pub fn summary_stats(&self) -> Option<CompletionStats> {
        self.stored_completion.as_ref().map(|r| r.stats())
    }

    /// Per-challenge rows rebuilt from the stored record. This is lossy by
    /// design: only the aggregate is persisted, so correctness comes from
    /// id membership, the submitted answer is unrecoverable, and each row
    /// gets an even share of the session-wide time.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let Some(record) = &self.stored_completion else {
            return Vec::new();
        };
        let per_challenge_secs = if record.total_challenges == 0 {
            0
        } else {
            record.time_spent_secs / u64::from(record.total_challenges)
        };
        record
            .challenge_ids
            .iter()
            .enumerate()
            .map(|(i, id)| SummaryRow {
                index_1based: i + 1,
                challenge_id: id.clone(),
                correct: record.correct_challenge_ids.contains(id),
                user_answer: String::new(),
                time_spent_secs: per_challenge_secs,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SystemClock;
    use crate::store::MemoryStorage;
    use chrono::Utc;

    #[test]
    fn rows_derive_correctness_from_id_membership() {
        let mut app = ChallengeApp::with_parts(
            CompletionStore::new(Box::new(MemoryStorage::default())),
            Box::new(SystemClock),
            "2026-08-24".to_owned(),
        );
        app.stored_completion = Some(CompletionRecord {
            date: "2026-08-24".into(),
            completed_at: Utc::now(),
            total_score: 10,
            correct_answers: 1,
            total_challenges: 2,
            accuracy: 50,
            time_spent_secs: 30,
            challenge_ids: vec!["a".into(), "b".into()],
            correct_challenge_ids: vec!["a".into()],
        });

        let rows = app.summary_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].correct);
        assert!(!rows[1].correct);
        // Lossy replay: answers gone, time split evenly.
        assert!(rows.iter().all(|r| r.user_answer.is_empty()));
        assert!(rows.iter().all(|r| r.time_spent_secs == 15));
    }
}
