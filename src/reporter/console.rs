//! Console reporter with colored output

use crate::advice::{self, Advice, PRACTICAL_TIPS};
use crate::source::QuestionOrigin;
use crate::{Category, CategoryScores, Question};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Decimals for percentages
    precision: usize,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            precision: crate::config::DEFAULT_PRECISION as usize,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Decimals shown for percentages
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Print the results page
    pub fn report_results(&self, scores: &CategoryScores, answered: usize, total: usize) {
        print!("{}", self.render_results(scores, answered, total));
    }

    /// Print the advice page
    pub fn report_advice(&self, advice: &Advice) {
        print!("{}", self.render_advice(advice));
    }

    /// Print a single line with the three percentages
    pub fn report_quiet(&self, scores: &CategoryScores, answered: usize) {
        println!("{}", self.render_quiet(scores, answered));
    }

    /// Print the question list
    pub fn report_questions(&self, questions: &[Question], origin: &QuestionOrigin) {
        print!("{}", self.render_questions(questions, origin));
    }

    pub fn render_results(&self, scores: &CategoryScores, answered: usize, total: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.bold("🌿 Dosha Assessment Results"));
        let _ = writeln!(out, "   Answered: {} of {} questions", answered, total);
        let _ = writeln!(out);

        for category in Category::ALL {
            let pct = scores.get(category);
            let _ = writeln!(
                out,
                "   {:<6} {} {:>w$.p$}%",
                self.category_label(category),
                self.bar(pct),
                pct,
                w = self.precision + 4,
                p = self.precision
            );
        }

        let _ = writeln!(out);
        if answered == 0 {
            let _ = writeln!(out, "   {}", self.dimmed("No answers recorded."));
            return out;
        }
        let primary = scores.ranked()[0].category;
        let _ = writeln!(
            out,
            "   {} {}",
            self.bold("Primary constitution:"),
            advice::display_name(primary)
        );
        let _ = writeln!(out, "   {}", self.dimmed(advice::description(primary)));
        let _ = writeln!(out);
        out
    }

    pub fn render_advice(&self, advice: &Advice) -> String {
        let record = advice.record;
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.bold("🌱 Your Personalized Ayurvedic Guidance"));
        let _ = writeln!(out);

        self.heading(&mut out, "Constitution Analysis");
        let _ = writeln!(
            out,
            "   Your primary constitution is {} ({}), with {} ({}) as your secondary influence.",
            self.bold(&advice.primary.to_string()),
            self.percent(advice.primary_percentage),
            self.bold(&advice.secondary.to_string()),
            self.percent(advice.secondary_percentage)
        );
        let _ = writeln!(out);

        self.heading(&mut out, "Dietary Recommendations");
        let _ = writeln!(out, "   Favor These Foods:");
        for food in record.favorable {
            let _ = writeln!(out, "     • {}", food);
        }
        let _ = writeln!(out, "   Avoid or Minimize:");
        for food in record.avoid {
            let _ = writeln!(out, "     • {}", food);
        }
        let _ = writeln!(out);

        self.heading(&mut out, "Lifestyle Recommendations");
        let _ = writeln!(out, "   Daily Routine: {}", record.routine);
        let _ = writeln!(out, "   Exercise: {}", record.exercise);
        let _ = writeln!(out, "   Stress Management: {}", record.stress);
        let _ = writeln!(out);

        self.heading(&mut out, "Seasonal Considerations");
        let _ = writeln!(out, "   {}", advice::seasonal_note(advice.primary));
        let _ = writeln!(out);

        self.heading(&mut out, "Practical Tips");
        for tip in PRACTICAL_TIPS {
            let _ = writeln!(out, "     • {}", tip);
        }
        let _ = writeln!(out);
        out
    }

    /// One line of percentages; the primary is named only once something was answered
    pub fn render_quiet(&self, scores: &CategoryScores, answered: usize) -> String {
        let parts: Vec<String> = Category::ALL
            .iter()
            .map(|&c| format!("{}: {}", c, self.percent(scores.get(c))))
            .collect();
        if answered == 0 {
            return format!("{} (no answers)", parts.join(" | "));
        }
        format!("{} ({})", parts.join(" | "), scores.ranked()[0].category)
    }

    pub fn render_questions(&self, questions: &[Question], origin: &QuestionOrigin) -> String {
        let mut out = String::new();
        match origin {
            QuestionOrigin::Parsed { from } => {
                let _ = writeln!(out, "{} questions from {}", questions.len(), from);
            }
            QuestionOrigin::Fallback { reason } => {
                let _ = writeln!(
                    out,
                    "{} built-in questions ({})",
                    questions.len(),
                    self.dimmed(reason)
                );
            }
        }
        for (qi, question) in questions.iter().enumerate() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}. {}", qi + 1, self.bold(&question.prompt));
            for (oi, option) in question.options.iter().enumerate() {
                let tag = option
                    .category
                    .map(|c| format!(" [{}]", self.category_label(c)))
                    .unwrap_or_default();
                let _ = writeln!(out, "   {}) {}{}", oi + 1, option.text, tag);
            }
        }
        out
    }

    fn heading(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "{}", self.bold(title));
    }

    fn percent(&self, value: f64) -> String {
        format!("{:.p$}%", value, p = self.precision)
    }

    fn bar(&self, percentage: f64) -> String {
        let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        format!(
            "[{}{}]",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        )
    }

    fn category_label(&self, category: Category) -> String {
        let label = category.to_string();
        if !self.use_colors {
            return label;
        }
        let colored: ColoredString = match category {
            Category::Vata => label.cyan(),
            Category::Pitta => label.red(),
            Category::Kapha => label.green(),
        };
        colored.to_string()
    }

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dimmed(&self, s: &str) -> String {
        if self.use_colors {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fallback_questions;
    use crate::AssessmentEngine;

    fn reporter() -> ConsoleReporter {
        ConsoleReporter::new().without_colors()
    }

    fn scores(vata: f64, pitta: f64, kapha: f64) -> CategoryScores {
        CategoryScores { vata, pitta, kapha }
    }

    #[test]
    fn test_results_show_each_category_and_primary() {
        let out = reporter().render_results(&scores(50.0, 25.0, 25.0), 4, 4);
        assert!(out.contains("Vata"));
        assert!(out.contains("50.0%"));
        assert!(out.contains("25.0%"));
        assert!(out.contains("Primary constitution: Vata (Air + Ether)"));
        assert!(out.contains("Creative, quick-thinking"));
    }

    #[test]
    fn test_results_without_answers() {
        let out = reporter().render_results(&CategoryScores::default(), 0, 2);
        assert!(out.contains("No answers recorded."));
        assert!(!out.contains("Primary constitution"));
    }

    #[test]
    fn test_bar_width() {
        let r = reporter();
        assert_eq!(r.bar(0.0).chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(r.bar(50.0).chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(r.bar(100.0).chars().filter(|&c| c == '█').count(), 20);
    }

    #[test]
    fn test_precision() {
        let out = reporter().with_precision(2).render_quiet(&scores(100.0 / 3.0, 0.0, 0.0), 3);
        assert!(out.contains("Vata: 33.33%"));
    }

    #[test]
    fn test_quiet_names_primary() {
        let out = reporter().render_quiet(&scores(0.0, 0.0, 100.0), 2);
        assert_eq!(out, "Vata: 0.0% | Pitta: 0.0% | Kapha: 100.0% (Kapha)");
    }

    #[test]
    fn test_quiet_without_answers_names_no_primary() {
        let out = reporter().render_quiet(&CategoryScores::default(), 0);
        assert_eq!(out, "Vata: 0.0% | Pitta: 0.0% | Kapha: 0.0% (no answers)");
        assert!(!out.contains("(Vata)"));
    }

    #[test]
    fn test_advice_shows_primary_lists_and_names_secondary() {
        let mut engine = AssessmentEngine::new(fallback_questions()).unwrap();
        engine.submit_answer(0, 1).unwrap();
        engine.submit_answer(1, 2).unwrap();
        let out = reporter().render_advice(&engine.advice());
        assert!(out.contains("Your primary constitution is Pitta (50.0%), with Kapha (50.0%)"));
        assert!(out.contains("Cooling foods"));
        assert!(out.contains("Hot, spicy foods"));
        assert!(out.contains("As a pitta type"));
        // The secondary category's own lists are never shown
        assert!(!out.contains("Light, dry foods"));
        assert!(out.contains("Maintain consistency"));
    }

    #[test]
    fn test_questions_listing() {
        let out = reporter().render_questions(
            &fallback_questions(),
            &QuestionOrigin::Fallback {
                reason: "missing file".to_string(),
            },
        );
        assert!(out.starts_with("2 built-in questions (missing file)"));
        assert!(out.contains("1. What best describes your body frame?"));
        assert!(out.contains("   3) Broad, heavy [Kapha]"));
    }
}
