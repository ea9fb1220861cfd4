// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::text::{four_filled_options, not_blank};

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Letters used to label options A to D.
pub const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// Represents one entry of the 'quiz_quizzes' collection.
///
/// Only `is_live` changes after the quiz is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub topic: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_live: bool,
    /// Teacher ID of the author.
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Topic for display; an empty topic reads "No topic".
    pub fn topic_label(&self) -> &str {
        if self.topic.trim().is_empty() {
            "No topic"
        } else {
            &self.topic
        }
    }

    /// Countdown length in seconds.
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

/// A four-option question embedded in a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 1-based position within the quiz.
    pub id: u32,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
    /// May be empty.
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// "B. text" for a valid option index, `None` otherwise.
    pub fn option_label(&self, index: usize) -> Option<String> {
        let letter = OPTION_LABELS.get(index)?;
        let text = self.options.get(index)?;
        Some(format!("{}. {}", letter, text))
    }

    pub fn correct_letter(&self) -> Option<char> {
        OPTION_LABELS.get(self.correct_index).copied()
    }

    pub fn explanation_label(&self) -> &str {
        if self.explanation.trim().is_empty() {
            "No explanation provided."
        } else {
            &self.explanation
        }
    }
}

/// Question as shown to a student during an exam (no answer, no explanation).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub index: usize,
    pub number: u32,
    pub text: String,
    pub options: Vec<String>,
}

impl PublicQuestion {
    pub fn from_question(index: usize, question: &Question) -> Self {
        Self {
            index,
            number: index as u32 + 1,
            text: question.text.clone(),
            options: (0..OPTION_COUNT)
                .filter_map(|i| question.option_label(i))
                .collect(),
        }
    }
}

/// DTO for adding a question to the in-progress draft.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub text: String,
    #[serde(default)]
    #[validate(custom(function = four_filled_options))]
    pub options: Vec<String>,
    #[serde(default)]
    #[validate(range(max = 3, message = "Correct option must be between A and D."))]
    pub correct_index: usize,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub explanation: String,
}

/// DTO for saving the draft as a quiz.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizRequest {
    #[serde(default)]
    #[validate(custom(function = not_blank), length(max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub topic: String,
    /// Falls back to the configured default when omitted.
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes."))]
    pub duration_minutes: Option<u32>,
}

/// Draft preview row: the question plus its correct option letter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuestion {
    pub number: u32,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct: char,
    pub explanation: String,
}

impl From<&Question> for DraftQuestion {
    fn from(q: &Question) -> Self {
        Self {
            number: q.id,
            text: q.text.clone(),
            options: q.options.clone(),
            correct: q.correct_letter().unwrap_or('?'),
            explanation: q.explanation.clone(),
        }
    }
}
