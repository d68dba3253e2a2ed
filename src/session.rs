//! Session flow: welcome, questions, results, advice
//!
//! A [`Session`] wraps one [`AssessmentEngine`] plus a cursor over the
//! questions. Every transition is explicit; triggers that do not apply to
//! the current state fail with [`QuizError::InvalidTransition`].

use crate::advice::Advice;
use crate::{AssessmentEngine, CategoryScores, Question, QuizError, RankedCategory};
use serde::Serialize;
use tracing::info;

/// Where the user is in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum SessionState {
    Welcome,
    /// Answering the question at `current`
    InProgress { current: usize },
    Results,
    Advice,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Welcome => write!(f, "on the welcome screen"),
            SessionState::InProgress { current } => {
                write!(f, "answering question {}", current + 1)
            }
            SessionState::Results => write!(f, "showing results"),
            SessionState::Advice => write!(f, "showing advice"),
        }
    }
}

/// One user's pass through the quiz
#[derive(Debug, Clone)]
pub struct Session {
    engine: AssessmentEngine,
    state: SessionState,
}

impl Session {
    pub fn new(engine: AssessmentEngine) -> Self {
        Self {
            engine,
            state: SessionState::Welcome,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// Welcome -> first question
    pub fn start(&mut self) -> Result<(), QuizError> {
        match self.state {
            SessionState::Welcome => {
                self.transition(SessionState::InProgress { current: 0 });
                Ok(())
            }
            state => Err(invalid("start", state)),
        }
    }

    /// The question being answered, while in progress
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        match self.state {
            SessionState::InProgress { current } => {
                self.engine.question(current).map(|q| (current, q))
            }
            _ => None,
        }
    }

    /// (1-based position, total) while in progress
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            SessionState::InProgress { current } => Some((current + 1, self.engine.len())),
            _ => None,
        }
    }

    /// Selection for the current question, if any
    pub fn current_answer(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { current } => self.engine.answer(current),
            _ => None,
        }
    }

    /// Select an option for the current question
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        match self.state {
            SessionState::InProgress { current } => self.engine.submit_answer(current, option),
            state => Err(invalid("select an option", state)),
        }
    }

    /// Advance; from the last question this finishes the quiz
    pub fn next(&mut self) -> Result<(), QuizError> {
        let SessionState::InProgress { current } = self.state else {
            return Err(invalid("go to the next question", self.state));
        };
        if self.engine.answer(current).is_none() {
            return Err(QuizError::Unanswered(current + 1));
        }
        if current + 1 < self.engine.len() {
            self.transition(SessionState::InProgress {
                current: current + 1,
            });
        } else {
            self.transition(SessionState::Results);
        }
        Ok(())
    }

    /// Go back one question. On the first question this does nothing.
    pub fn previous(&mut self) -> Result<(), QuizError> {
        match self.state {
            SessionState::InProgress { current } => {
                if current > 0 {
                    self.transition(SessionState::InProgress {
                        current: current - 1,
                    });
                }
                Ok(())
            }
            state => Err(invalid("go to the previous question", state)),
        }
    }

    /// Results -> advice
    pub fn show_advice(&mut self) -> Result<Advice, QuizError> {
        match self.state {
            SessionState::Results => {
                self.transition(SessionState::Advice);
                Ok(self.engine.advice())
            }
            state => Err(invalid("show advice", state)),
        }
    }

    /// Advice -> results
    pub fn back_to_results(&mut self) -> Result<(), QuizError> {
        match self.state {
            SessionState::Advice => {
                self.transition(SessionState::Results);
                Ok(())
            }
            state => Err(invalid("go back to results", state)),
        }
    }

    /// Back to the welcome screen with every answer cleared. Allowed from any state.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.transition(SessionState::Welcome);
    }

    /// Scores, available once the quiz is finished
    pub fn scores(&self) -> Option<CategoryScores> {
        match self.state {
            SessionState::Results | SessionState::Advice => Some(self.engine.compute_scores()),
            _ => None,
        }
    }

    pub fn ranking(&self) -> Option<[RankedCategory; 3]> {
        self.scores().map(|s| s.ranked())
    }

    fn transition(&mut self, to: SessionState) {
        info!(from = %self.state, to = %to, "session transition");
        self.state = to;
    }
}

fn invalid(action: &'static str, state: SessionState) -> QuizError {
    QuizError::InvalidTransition { action, state }
}
