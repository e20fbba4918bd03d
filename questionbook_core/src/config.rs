//! Question book configuration

use crate::error::{GenerateError, Result};

/// Runtime settings for question book generation and grading feedback
#[derive(Clone, Debug)]
pub struct QuestionBookConfig {
    /// Items generated for every topic slot of the book
    pub questions_per_topic: usize,
    /// Fixed seed for a reproducible book
    pub seed: Option<u64>,
    /// Similarity at or above which a wrong text answer gets an "almost" hint
    pub near_miss_threshold: f64,
}

impl Default for QuestionBookConfig {
    fn default() -> Self {
        Self {
            questions_per_topic: 10,
            seed: None,
            near_miss_threshold: 0.8,
        }
    }
}

impl QuestionBookConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            questions_per_topic: std::env::var("QUESTIONBOOK_QUESTIONS_PER_TOPIC").ok().and_then(|v| v.parse().ok()).unwrap_or(default.questions_per_topic),
            seed: std::env::var("QUESTIONBOOK_SEED").ok().and_then(|v| v.parse().ok()).or(default.seed),
            near_miss_threshold: std::env::var("QUESTIONBOOK_NEAR_MISS_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.near_miss_threshold),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions_per_topic == 0 {
            return Err(GenerateError::InvalidConfig {
                field: "questions_per_topic",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.near_miss_threshold > 0.0 && self.near_miss_threshold <= 1.0) {
            return Err(GenerateError::InvalidConfig {
                field: "near_miss_threshold",
                reason: format!("{} is outside (0, 1]", self.near_miss_threshold),
            });
        }
        Ok(())
    }
}
