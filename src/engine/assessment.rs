//! Assessment engine: answers in, scores and advice out

use crate::advice::{self, Advice};
use crate::{Category, CategoryScores, Question, QuizError, RankedCategory};
use std::collections::BTreeMap;

use super::scoring::ScoreCalculator;

/// Selected option index per question index. Absent means unanswered.
pub type AnswerSet = BTreeMap<usize, usize>;

/// Holds one user's question set and answers for the length of a session
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    questions: Vec<Question>,
    answers: AnswerSet,
}

impl AssessmentEngine {
    /// Create an engine over a non-empty question set where every question has options
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        crate::source::validate(&questions)?;
        Ok(Self {
            questions,
            answers: AnswerSet::new(),
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: construction rejects empty question sets
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The selected option for a question, if answered
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Record a selection, replacing any earlier one for the same question.
    ///
    /// Out-of-range indices fail and leave the answers untouched.
    pub fn submit_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        let q = self
            .questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange {
                index: question,
                len: self.questions.len(),
            })?;
        if option >= q.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question,
                option,
                len: q.options.len(),
            });
        }
        self.answers.insert(question, option);
        Ok(())
    }

    /// Forget the selection for one question
    pub fn clear_answer(&mut self, question: usize) -> Option<usize> {
        self.answers.remove(&question)
    }

    /// Forget every selection
    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// True when every question has a selection
    pub fn is_complete(&self) -> bool {
        (0..self.questions.len()).all(|i| self.answers.contains_key(&i))
    }

    /// Recompute percentages from the current answers
    pub fn compute_scores(&self) -> CategoryScores {
        ScoreCalculator::calculate(&self.questions, &self.answers)
    }

    /// Categories highest first; equal scores keep the order Vata, Pitta, Kapha
    pub fn rank_categories(&self) -> [RankedCategory; 3] {
        ScoreCalculator::rank(&self.compute_scores())
    }

    /// Advice for the given primary and secondary categories.
    ///
    /// Only the primary's record is carried; the secondary is named with its
    /// percentage.
    pub fn select_advice(&self, primary: Category, secondary: Category) -> Advice {
        let scores = self.compute_scores();
        Advice {
            primary,
            primary_percentage: scores.get(primary),
            secondary,
            secondary_percentage: scores.get(secondary),
            record: advice::record(primary),
        }
    }

    /// Advice for the two highest-ranked categories
    pub fn advice(&self) -> Advice {
        let [first, second, _] = self.rank_categories();
        self.select_advice(first.category, second.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuizOption;

    fn tri_question(prompt: &str) -> Question {
        Question::new(
            prompt,
            vec![
                QuizOption::tagged("thin", Category::Vata),
                QuizOption::tagged("medium", Category::Pitta),
                QuizOption::tagged("broad", Category::Kapha),
            ],
        )
    }

    fn engine(n: usize) -> AssessmentEngine {
        let questions = (0..n).map(|i| tri_question(&format!("q{i}"))).collect();
        AssessmentEngine::new(questions).unwrap()
    }

    fn order(engine: &AssessmentEngine) -> Vec<Category> {
        engine.rank_categories().iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_rejects_empty_question_set() {
        assert_eq!(
            AssessmentEngine::new(vec![]).unwrap_err(),
            QuizError::NoQuestions
        );
    }

    #[test]
    fn test_rejects_question_without_options() {
        let err = AssessmentEngine::new(vec![tri_question("ok"), Question::new("empty", vec![])])
            .unwrap_err();
        assert!(matches!(err, QuizError::EmptyQuestion { index: 2, .. }));
    }

    #[test]
    fn test_revisit_overwrites_answer() {
        let mut e = engine(3);
        e.submit_answer(2, 0).unwrap();
        e.submit_answer(2, 1).unwrap();
        assert_eq!(e.answer(2), Some(1));
        assert_eq!(e.answered_count(), 1);
    }

    #[test]
    fn test_out_of_range_question_leaves_state() {
        let mut e = engine(2);
        e.submit_answer(0, 1).unwrap();
        let err = e.submit_answer(2, 0).unwrap_err();
        assert_eq!(err, QuizError::QuestionOutOfRange { index: 2, len: 2 });
        assert_eq!(e.answers().len(), 1);
        assert_eq!(e.answer(0), Some(1));
    }

    #[test]
    fn test_out_of_range_option() {
        let mut e = engine(2);
        let err = e.submit_answer(1, 3).unwrap_err();
        assert_eq!(
            err,
            QuizError::OptionOutOfRange {
                question: 1,
                option: 3,
                len: 3
            }
        );
        assert_eq!(e.answer(1), None);
    }

    #[test]
    fn test_is_complete_requires_every_question() {
        let mut e = engine(3);
        assert!(!e.is_complete());
        e.submit_answer(0, 0).unwrap();
        e.submit_answer(2, 0).unwrap();
        assert!(!e.is_complete());
        e.submit_answer(1, 2).unwrap();
        assert!(e.is_complete());
    }

    #[test]
    fn test_answers_in_any_order() {
        let mut forward = engine(3);
        let mut backward = engine(3);
        for (q, o) in [(0, 0), (1, 1), (2, 1)] {
            forward.submit_answer(q, o).unwrap();
        }
        for (q, o) in [(2, 1), (1, 1), (0, 0)] {
            backward.submit_answer(q, o).unwrap();
        }
        assert_eq!(forward.compute_scores(), backward.compute_scores());
    }

    #[test]
    fn test_zero_answers_scores_zero() {
        let e = engine(2);
        assert_eq!(e.compute_scores(), CategoryScores::default());
    }

    #[test]
    fn test_two_vata_answers_end_to_end() {
        let mut e = engine(2);
        e.submit_answer(0, 0).unwrap();
        e.submit_answer(1, 0).unwrap();
        let scores = e.compute_scores();
        assert_eq!(scores.vata, 100.0);
        assert_eq!(scores.pitta, 0.0);
        assert_eq!(scores.kapha, 0.0);
        assert_eq!(order(&e), vec![Category::Vata, Category::Pitta, Category::Kapha]);
    }

    #[test]
    fn test_all_equal_rank_is_deterministic() {
        let mut e = engine(3);
        e.submit_answer(0, 0).unwrap();
        e.submit_answer(1, 1).unwrap();
        e.submit_answer(2, 2).unwrap();
        let first = order(&e);
        assert_eq!(first, Category::ALL.to_vec());
        for _ in 0..10 {
            assert_eq!(order(&e), first);
        }
    }

    #[test]
    fn test_reset_clears_answers() {
        let mut e = engine(2);
        e.submit_answer(0, 0).unwrap();
        e.reset();
        assert_eq!(e.answered_count(), 0);
        assert_eq!(e.compute_scores(), CategoryScores::default());
    }

    #[test]
    fn test_clear_answer() {
        let mut e = engine(2);
        e.submit_answer(1, 2).unwrap();
        assert_eq!(e.clear_answer(1), Some(2));
        assert_eq!(e.clear_answer(1), None);
    }

    #[test]
    fn test_advice_uses_primary_record_only() {
        let mut e = engine(3);
        e.submit_answer(0, 1).unwrap();
        e.submit_answer(1, 1).unwrap();
        e.submit_answer(2, 2).unwrap();
        let advice = e.advice();
        assert_eq!(advice.primary, Category::Pitta);
        assert_eq!(advice.secondary, Category::Kapha);
        assert!((advice.primary_percentage - 200.0 / 3.0).abs() < 1e-9);
        assert!((advice.secondary_percentage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(advice.record, advice::record(Category::Pitta));
    }

    #[test]
    fn test_select_advice_explicit_pair() {
        let mut e = engine(1);
        e.submit_answer(0, 2).unwrap();
        let advice = e.select_advice(Category::Vata, Category::Kapha);
        assert_eq!(advice.primary_percentage, 0.0);
        assert_eq!(advice.secondary_percentage, 100.0);
        assert_eq!(advice.record, advice::record(Category::Vata));
    }
}
