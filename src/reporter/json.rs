//! JSON reporter for machine-readable output

use crate::advice::Advice;
use crate::source::QuestionOrigin;
use crate::{AnswerSet, AssessmentEngine, CategoryScores, Question, RankedCategory};
use serde::Serialize;

/// Everything known about a finished (or partial) assessment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    /// Where the questions came from
    pub origin: QuestionOrigin,
    pub total_questions: usize,
    pub answered: usize,
    pub complete: bool,
    /// Selected option per question index
    pub answers: AnswerSet,
    pub scores: CategoryScores,
    /// Highest first
    pub ranking: [RankedCategory; 3],
    /// Present only when at least one question was answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<Advice>,
}

impl AssessmentReport {
    pub fn from_engine(engine: &AssessmentEngine, origin: QuestionOrigin) -> Self {
        let scores = engine.compute_scores();
        Self {
            origin,
            total_questions: engine.len(),
            answered: engine.answered_count(),
            complete: engine.is_complete(),
            answers: engine.answers().clone(),
            scores,
            ranking: scores.ranked(),
            advice: (engine.answered_count() > 0).then(|| engine.advice()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsOutput<'a> {
    origin: &'a QuestionOrigin,
    questions: &'a [Question],
}

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report an assessment as JSON
    pub fn report(&self, report: &AssessmentReport) -> String {
        self.render(report, "{}")
    }

    /// Report a parsed question set as JSON
    pub fn report_questions(&self, questions: &[Question], origin: &QuestionOrigin) -> String {
        self.render(&QuestionsOutput { origin, questions }, "{}")
    }

    fn render<T: Serialize>(&self, value: &T, empty: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| empty.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
