//! Score calculation for dosha assessments

use crate::{Category, CategoryScores, Question, RankedCategory};

use super::AnswerSet;

/// Calculator for category percentages
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Percentage per category over every answered question.
    ///
    /// Each answered question counts toward the total; only tagged options
    /// count toward a category, so untagged answers leave the sum below 100.
    /// Answers pointing outside the question set are skipped.
    pub fn calculate(questions: &[Question], answers: &AnswerSet) -> CategoryScores {
        let mut counts = [0usize; 3];
        for (&question, &option) in answers.iter() {
            let category = questions
                .get(question)
                .and_then(|q| q.options.get(option))
                .and_then(|o| o.category);
            if let Some(category) = category {
                counts[Self::slot(category)] += 1;
            }
        }

        let total_answered = answers.len();
        let mut scores = CategoryScores::default();
        if total_answered == 0 {
            return scores;
        }
        for category in Category::ALL {
            let count = counts[Self::slot(category)];
            scores.set(category, count as f64 / total_answered as f64 * 100.0);
        }
        scores
    }

    /// Categories highest first, ties in canonical order
    pub fn rank(scores: &CategoryScores) -> [RankedCategory; 3] {
        scores.ranked()
    }

    fn slot(category: Category) -> usize {
        match category {
            Category::Vata => 0,
            Category::Pitta => 1,
            Category::Kapha => 2,
        }
    }
}
