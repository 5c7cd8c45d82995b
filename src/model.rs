use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    MultipleChoice,
    AudioRecognition,
    TranslationBuilder,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "🌱 Beginner",
            Difficulty::Intermediate => "🌿 Intermediate",
            Difficulty::Advanced => "🌳 Advanced",
        }
    }
}

/// The answer a challenge expects. Scalar for multiple choice and audio
/// recognition, an ordered token list for the translation builder.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Choice(String),
    Tokens(Vec<String>),
}

/// What the learner actually submitted, mirroring [`CorrectAnswer`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Choice(String),
    Tokens(Vec<String>),
}

impl SubmittedAnswer {
    pub fn is_empty(&self) -> bool {
        match self {
            SubmittedAnswer::Choice(s) => s.is_empty(),
            SubmittedAnswer::Tokens(t) => t.is_empty(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            SubmittedAnswer::Choice(s) => s.clone(),
            SubmittedAnswer::Tokens(t) => t.join(" "),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub question: String,
    pub correct_answer: CorrectAnswer,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub word_bank: Option<Vec<String>>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    pub points: u32,
}

/// One calendar date's quiz set. The order of `challenges` is significant
/// and fixed for the whole session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub date: String, // YYYY-MM-DD
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub total_points: u32,
    /// Rough estimate in minutes, display only.
    #[serde(default)]
    pub estimated_time: u32,
}

/// The record of one answered challenge, created exactly once per challenge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub challenge_id: String,
    pub user_answer: SubmittedAnswer,
    pub is_correct: bool,
    pub points_earned: u32,
    pub time_spent_secs: u64,
}

/// The durable aggregate written once a daily set has been finished,
/// keyed by date. A second completion for the same date overwrites.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionRecord {
    pub date: String,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub total_score: u32,
    pub correct_answers: u32,
    pub total_challenges: u32,
    /// Whole percent, 0..=100. Always `round(100 * correct / total)`.
    pub accuracy: u32,
    pub time_spent_secs: u64,
    pub challenge_ids: Vec<String>,
    pub correct_challenge_ids: Vec<String>,
}

impl CompletionRecord {
    pub fn stats(&self) -> CompletionStats {
        CompletionStats {
            total_score: self.total_score,
            correct_answers: self.correct_answers,
            total_challenges: self.total_challenges,
            accuracy: self.accuracy,
            time_spent_secs: self.time_spent_secs,
            correct_challenge_ids: self.correct_challenge_ids.clone(),
        }
    }
}

/// What the summary view consumes: a [`CompletionRecord`] minus its keys.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionStats {
    pub total_score: u32,
    pub correct_answers: u32,
    pub total_challenges: u32,
    pub accuracy: u32,
    pub time_spent_secs: u64,
    pub correct_challenge_ids: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Welcome,
    Loading,
    Challenge,
    Summary,
    Unavailable,
}
