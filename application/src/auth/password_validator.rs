use crate::error::{AppError, AppResult};
use zxcvbn::{Score, zxcvbn};

/// Strength gate for new passwords. The hasher itself enforces nothing;
/// every constraint on plaintexts lives here, at the use-case boundary.
pub struct PasswordValidator {
    min_score: Score,
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self {
            min_score: Score::Three,
        }
    }
}

impl PasswordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps scores above 4 to the maximum zxcvbn score.
    pub fn from_min_score(min_score: u8) -> Self {
        let min_score = match min_score {
            0 => Score::Zero,
            1 => Score::One,
            2 => Score::Two,
            3 => Score::Three,
            _ => Score::Four,
        };
        Self { min_score }
    }

    pub fn validate(&self, password: &str) -> AppResult<()> {
        let estimate = zxcvbn(password, &[]);
        if estimate.score() >= self.min_score {
            return Ok(());
        }

        let mut feedback_messages = Vec::new();
        if let Some(feedback) = estimate.feedback() {
            if let Some(warning) = feedback.warning() {
                feedback_messages.push(warning.to_string());
            }
            for suggestion in feedback.suggestions() {
                feedback_messages.push(suggestion.to_string());
            }
        }
        if feedback_messages.is_empty() {
            feedback_messages.push("Password is too weak".to_string());
        }

        Err(AppError::ValidationError {
            message: format!(
                "Password strength is insufficient (score: {}/4, minimum: {}). {}",
                estimate.score() as u8,
                self.min_score as u8,
                feedback_messages.join("; ")
            ),
        })
    }
}
