//! Plain display structs handed from the app to the views.

#[derive(Clone, Debug)]
pub struct SummaryRow {
    pub index_1based: usize,
    pub challenge_id: String,
    pub correct: bool,
    /// Empty when replayed from storage; only the aggregate survives.
    pub user_answer: String,
    pub time_spent_secs: u64,
}

impl SummaryRow {
    pub fn status_label(&self) -> &'static str {
        if self.correct { "✅ Correct" } else { "❌ Missed" }
    }

    pub fn answer_label(&self) -> &str {
        if self.user_answer.is_empty() {
            "—"
        } else {
            &self.user_answer
        }
    }
}

pub fn format_duration(secs: u64) -> String {
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_short_and_long() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m 00s");
        assert_eq!(format_duration(125), "2m 05s");
    }
}
