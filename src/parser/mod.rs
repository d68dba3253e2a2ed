//! Parser for tagged question files
//!
//! The format is line oriented:
//!
//! ```text
//! <Question 1>What best describes your body frame?</Question 1>
//! <Option 1>Thin, light (Vata)</Option 1>
//! <Option 2>Medium, muscular (Pitta)</Option 2>
//! ```
//!
//! Unrecognised lines are skipped. The parser never fails; checking that
//! every question got options is left to [`crate::source::validate`].

mod tag;

pub use tag::{CategoryMatcher, TrailingTagMatcher};

use crate::{Question, QuizOption};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Line scanner that turns tagged text into questions
pub struct QuestionParser {
    matcher: Box<dyn CategoryMatcher>,
}

impl QuestionParser {
    /// Create a parser using the trailing `(Category)` tag rule
    pub fn new() -> Self {
        Self {
            matcher: Box::new(TrailingTagMatcher),
        }
    }

    /// Use a different rule for attributing options to categories
    pub fn with_matcher(mut self, matcher: impl CategoryMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Parse raw text into questions, in input order
    pub fn parse(&self, raw: &str) -> Vec<Question> {
        let mut questions = Vec::new();
        let mut current: Option<Question> = None;

        for (zero_indexed, line) in raw.split('\n').enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(prompt) = tagged_content(line, TagKind::Question) {
                if let Some(done) = current.take() {
                    questions.push(done);
                }
                current = Some(Question::new(prompt, Vec::new()));
                continue;
            }

            if let Some(content) = tagged_content(line, TagKind::Option) {
                match current.as_mut() {
                    Some(question) => {
                        let (text, category) = self.matcher.split(content);
                        question.options.push(QuizOption { text, category });
                    }
                    None => debug!(line = zero_indexed + 1, "option before any question, skipped"),
                }
                continue;
            }

            debug!(line = zero_indexed + 1, "unrecognised line skipped");
        }

        if let Some(done) = current {
            questions.push(done);
        }

        debug!(count = questions.len(), "parsed questions");
        questions
    }
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with the default tag rule
pub fn parse_questions(raw: &str) -> Vec<Question> {
    QuestionParser::new().parse(raw)
}

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Question,
    Option,
}

impl TagKind {
    fn name(self) -> &'static str {
        match self {
            TagKind::Question => "Question",
            TagKind::Option => "Option",
        }
    }

    fn open_regex(self) -> &'static Regex {
        static QUESTION: OnceLock<Regex> = OnceLock::new();
        static OPTION: OnceLock<Regex> = OnceLock::new();
        let cell = match self {
            TagKind::Question => &QUESTION,
            TagKind::Option => &OPTION,
        };
        cell.get_or_init(|| {
            Regex::new(&format!(r"<{} ([0-9]+)>", self.name())).expect("valid open tag regex")
        })
    }
}

/// Content between `<Kind N>` and the first following `</Kind N>` with the same N.
///
/// Open tags are tried left to right; one without a matching close tag is
/// passed over, so `<Option 1>a</Option 2>` does not match.
fn tagged_content(line: &str, kind: TagKind) -> Option<&str> {
    for caps in kind.open_regex().captures_iter(line) {
        let (Some(open), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let close = format!("</{} {}>", kind.name(), number.as_str());
        let rest = &line[open.end()..];
        if let Some(end) = rest.find(&close) {
            return Some(&rest[..end]);
        }
    }
    None
}
