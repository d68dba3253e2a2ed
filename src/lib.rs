//! Prakriti: Ayurvedic constitution quiz
//!
//! This library parses tagged question files, scores a user's answers against
//! the three doshas, ranks them and selects the static advice shown for the
//! dominant constitution.

pub mod advice;
pub mod config;
pub mod engine;
pub mod parser;
pub mod reporter;
pub mod session;
pub mod source;

pub use advice::{Advice, AdviceRecord};
pub use engine::{AnswerSet, AssessmentEngine};
pub use parser::{parse_questions, CategoryMatcher, QuestionParser, TrailingTagMatcher};
pub use session::{Session, SessionState};
pub use source::{
    load_questions, InvalidPolicy, LoadedQuestions, QuestionOrigin, QuestionSource, SourceError,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three constitutional categories (doshas).
///
/// Declaration order is the canonical order used to break ranking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vata,
    Pitta,
    Kapha,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 3] = [Category::Vata, Category::Pitta, Category::Kapha];

    /// Lower-case identifier ("vata")
    pub fn id(self) -> &'static str {
        match self {
            Category::Vata => "vata",
            Category::Pitta => "pitta",
            Category::Kapha => "kapha",
        }
    }

    /// Case-insensitive lookup from a tag such as "Vata" or "KAPHA"
    pub fn from_tag(tag: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(tag.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Vata => write!(f, "Vata"),
            Category::Pitta => write!(f, "Pitta"),
            Category::Kapha => write!(f, "Kapha"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s).ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}

/// A selectable answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Visible text, with any category tag stripped
    pub text: String,
    /// Category this option counts toward, if tagged
    pub category: Option<Category>,
}

impl QuizOption {
    pub fn new(text: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn tagged(text: impl Into<String>, category: Category) -> Self {
        Self::new(text, Some(category))
    }
}

/// A prompt plus its ordered options. The option index is the answer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }
}

/// Percentage (0-100) per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub vata: f64,
    pub pitta: f64,
    pub kapha: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Vata => self.vata,
            Category::Pitta => self.pitta,
            Category::Kapha => self.kapha,
        }
    }

    pub(crate) fn set(&mut self, category: Category, value: f64) {
        match category {
            Category::Vata => self.vata = value,
            Category::Pitta => self.pitta = value,
            Category::Kapha => self.kapha = value,
        }
    }

    /// Sum of the three percentages. Below 100 when untagged options were chosen.
    pub fn total(&self) -> f64 {
        self.vata + self.pitta + self.kapha
    }

    /// Categories with their percentage, highest first. Ties keep canonical order.
    pub fn ranked(&self) -> [RankedCategory; 3] {
        let mut ranked = Category::ALL.map(|category| RankedCategory {
            category,
            percentage: self.get(category),
        });
        // sort_by is stable, so equal scores stay in declaration order
        ranked.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        ranked
    }
}

/// A category and its percentage, as produced by ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedCategory {
    pub category: Category,
    pub percentage: f64,
}

/// Errors raised by the quiz core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("question index {index} out of range (quiz has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option index {option} out of range for question {question} ({len} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        len: usize,
    },

    #[error("question set is empty")]
    NoQuestions,

    /// `index` is 1-based, as shown to users
    #[error("question {index} (\"{prompt}\") has no options")]
    EmptyQuestion { index: usize, prompt: String },

    #[error("please select an option for question {0} before continuing")]
    Unanswered(usize),

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("vata".parse::<Category>(), Ok(Category::Vata));
        assert_eq!(" KAPHA ".parse::<Category>(), Ok(Category::Kapha));
        assert_eq!(
            "agni".parse::<Category>(),
            Err(QuizError::UnknownCategory("agni".to_string()))
        );
    }

    #[test]
    fn test_category_display_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_message() {
        let err = "fire".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: fire");
    }
}
