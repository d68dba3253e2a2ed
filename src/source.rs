//! Question sources, validation and the built-in fallback set

use crate::parser::QuestionParser;
use crate::{Category, Question, QuizError, QuizOption};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure to obtain raw question text
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },
}

/// Provider of raw tagged question text
pub trait QuestionSource {
    /// Obtain the whole text. Called once per load.
    fn fetch(&self) -> Result<String, SourceError>;

    /// Short human-readable origin, e.g. the path
    fn describe(&self) -> String;
}

/// Reads questions from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for FileSource {
    fn fetch(&self) -> Result<String, SourceError> {
        std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Questions already held in memory
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
}

impl InlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl QuestionSource for InlineSource {
    fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "inline text".to_string()
    }
}

/// Fetches questions over HTTP(S)
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "remote")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "remote")]
impl QuestionSource for HttpSource {
    fn fetch(&self) -> Result<String, SourceError> {
        let http = |e: reqwest::Error| SourceError::Http {
            url: self.url.clone(),
            message: e.to_string(),
        };
        reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(http)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source for a location: http(s) URLs need the `remote` feature,
/// everything else is a file path.
pub fn source_for(location: &str) -> Box<dyn QuestionSource> {
    remote_source(location).unwrap_or_else(|| Box::new(FileSource::new(location)))
}

#[cfg(feature = "remote")]
fn remote_source(location: &str) -> Option<Box<dyn QuestionSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Some(Box::new(HttpSource::new(location)))
    } else {
        None
    }
}

#[cfg(not(feature = "remote"))]
fn remote_source(_location: &str) -> Option<Box<dyn QuestionSource>> {
    None
}

/// What to do when the parsed questions fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Use the built-in questions instead (default)
    #[default]
    Fallback,
    /// Report the validation error
    Error,
}

/// Where a question set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum QuestionOrigin {
    Parsed { from: String },
    Fallback { reason: String },
}

/// Questions ready for an engine, with their origin
#[derive(Debug, Clone)]
pub struct LoadedQuestions {
    pub questions: Vec<Question>,
    pub origin: QuestionOrigin,
}

impl LoadedQuestions {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, QuestionOrigin::Fallback { .. })
    }
}

/// A question set is usable when it is non-empty and every question has an option
pub fn validate(questions: &[Question]) -> Result<(), QuizError> {
    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    if let Some((index, q)) = questions
        .iter()
        .enumerate()
        .find(|(_, q)| q.options.is_empty())
    {
        return Err(QuizError::EmptyQuestion {
            index: index + 1,
            prompt: q.prompt.clone(),
        });
    }
    Ok(())
}

/// Fetch, parse and validate. Fetch failures always fall back to the
/// built-in questions; validation failures fall back unless the policy is
/// [`InvalidPolicy::Error`].
pub fn load_questions(
    source: &dyn QuestionSource,
    parser: &QuestionParser,
    policy: InvalidPolicy,
) -> Result<LoadedQuestions, QuizError> {
    let text = match source.fetch() {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "could not load questions, using built-in set");
            return Ok(fallback(e.to_string()));
        }
    };

    let questions = parser.parse(&text);
    match validate(&questions) {
        Ok(()) => {
            debug!(from = %source.describe(), count = questions.len(), "questions loaded");
            Ok(LoadedQuestions {
                questions,
                origin: QuestionOrigin::Parsed {
                    from: source.describe(),
                },
            })
        }
        Err(e) if policy == InvalidPolicy::Fallback => {
            warn!(from = %source.describe(), error = %e, "invalid question file, using built-in set");
            Ok(fallback(format!("{}: {}", source.describe(), e)))
        }
        Err(e) => Err(e),
    }
}

fn fallback(reason: String) -> LoadedQuestions {
    LoadedQuestions {
        questions: fallback_questions(),
        origin: QuestionOrigin::Fallback { reason },
    }
}

/// Built-in questions used when no usable question file is available
pub fn fallback_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What best describes your body frame?",
            vec![
                QuizOption::tagged("Thin, light", Category::Vata),
                QuizOption::tagged("Medium, muscular", Category::Pitta),
                QuizOption::tagged("Broad, heavy", Category::Kapha),
            ],
        ),
        Question::new(
            "How would you describe your skin type?",
            vec![
                QuizOption::tagged("Dry, rough", Category::Vata),
                QuizOption::tagged("Warm, oily, reddish", Category::Pitta),
                QuizOption::tagged("Soft, moist, pale", Category::Kapha),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl QuestionSource for Failing {
        fn fetch(&self) -> Result<String, SourceError> {
            Err(SourceError::Io {
                path: PathBuf::from("questions.txt"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }

        fn describe(&self) -> String {
            "questions.txt".to_string()
        }
    }

    fn load(source: &dyn QuestionSource, policy: InvalidPolicy) -> Result<LoadedQuestions, QuizError> {
        load_questions(source, &QuestionParser::new(), policy)
    }

    #[test]
    fn test_fallback_set_is_valid() {
        assert!(validate(&fallback_questions()).is_ok());
    }

    #[test]
    fn test_fetch_failure_falls_back_even_when_strict() {
        let loaded = load(&Failing, InvalidPolicy::Error).unwrap();
        assert!(loaded.is_fallback());
        assert_eq!(loaded.questions, fallback_questions());
        match loaded.origin {
            QuestionOrigin::Fallback { reason } => assert!(reason.contains("questions.txt")),
            other => panic!("unexpected origin {other:?}"),
        }
    }

    #[test]
    fn test_valid_text_is_parsed() {
        let source = InlineSource::new("<Question 1>Q</Question 1>\n<Option 1>A (Vata)</Option 1>");
        let loaded = load(&source, InvalidPolicy::Fallback).unwrap();
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.questions.len(), 1);
    }

    #[test]
    fn test_zero_option_question_falls_back() {
        let source = InlineSource::new(
            "<Question 1>Q</Question 1>\n<Option 1>A (Vata)</Option 1>\n<Question 2>Empty</Question 2>",
        );
        let loaded = load(&source, InvalidPolicy::Fallback).unwrap();
        assert!(loaded.is_fallback());
    }

    #[test]
    fn test_zero_option_question_errors_when_strict() {
        let source = InlineSource::new("<Question 1>Empty</Question 1>");
        let err = load(&source, InvalidPolicy::Error).unwrap_err();
        assert_eq!(
            err,
            QuizError::EmptyQuestion {
                index: 1,
                prompt: "Empty".to_string()
            }
        );
    }

    #[test]
    fn test_empty_text_falls_back() {
        let loaded = load(&InlineSource::new(""), InvalidPolicy::Fallback).unwrap();
        assert!(loaded.is_fallback());
        assert_eq!(
            load(&InlineSource::new("nothing here"), InvalidPolicy::Error).unwrap_err(),
            QuizError::NoQuestions
        );
    }

    #[test]
    fn test_file_source_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("questions.txt");
        std::fs::write(&path, "<Question 1>Q</Question 1>\n<Option 1>A</Option 1>\n").unwrap();
        let source = FileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        let loaded = load(&source, InvalidPolicy::Error).unwrap();
        assert_eq!(
            loaded.origin,
            QuestionOrigin::Parsed {
                from: path.display().to_string()
            }
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = FileSource::new("/nonexistent/questions.txt").fetch().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/questions.txt"));
    }

    #[cfg(feature = "remote")]
    #[test]
    fn test_unreachable_url_falls_back() {
        let source = source_for("http://127.0.0.1:9/questions.txt");
        assert_eq!(source.describe(), "http://127.0.0.1:9/questions.txt");
        assert!(matches!(source.fetch(), Err(SourceError::Http { .. })));

        let loaded = load(source.as_ref(), InvalidPolicy::Error).unwrap();
        assert!(loaded.is_fallback());
        match loaded.origin {
            QuestionOrigin::Fallback { reason } => {
                assert!(reason.contains("http://127.0.0.1:9/questions.txt"))
            }
            other => panic!("unexpected origin {other:?}"),
        }
    }
}
