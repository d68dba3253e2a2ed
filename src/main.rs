//! Prakriti: Ayurvedic constitution quiz CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use prakriti::config::{default_config_json, load_config, Config, CONFIG_FILENAME};
use prakriti::reporter::{AssessmentReport, ConsoleReporter, JsonReporter};
use prakriti::source::{self, source_for, LoadedQuestions};
use prakriti::{
    load_questions, AssessmentEngine, QuestionOrigin, QuestionParser, Session, SessionState,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_QUESTIONS: &str = "questions.txt";

/// Prakriti: discover your Ayurvedic constitution
#[derive(Parser, Debug)]
#[command(name = "prakriti")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Question file (default: from config, then ./questions.txt)
    questions: Option<String>,

    /// Answer without prompting: 1-based option numbers in question order (e.g. 1,3,2)
    #[arg(long, short, value_delimiter = ',')]
    answers: Option<Vec<usize>>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (only the percentages)
    #[arg(long, short)]
    quiet: bool,

    /// Also print the advice page (with --answers)
    #[arg(long)]
    advice: bool,

    /// Fail instead of using the built-in questions when the question file is invalid
    #[arg(long)]
    strict: bool,

    /// Decimals shown for percentages
    #[arg(long)]
    precision: Option<u8>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to config file (default: search .prakritirc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a question file and list its questions (exit 1 if unusable)
    Questions {
        /// Question file (default: from config, then ./questions.txt)
        path: Option<String>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create .prakritirc.json with sensible defaults
    Init {
        /// Question file to reference in the config
        #[arg(long)]
        questions: Option<String>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Questions { path, json, config } => {
                run_questions(path.as_deref(), json, config.as_deref())
            }
            Commands::Init { questions, dir } => run_init(questions.as_deref(), dir.as_deref()),
        };
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(
        args.questions.as_deref(),
        args.strict,
        args.precision,
    );

    let loaded = load(&config)?;
    if let QuestionOrigin::Fallback { reason } = &loaded.origin {
        if !args.quiet {
            eprintln!(
                "{}: using built-in questions ({})",
                "Warning".yellow(),
                reason
            );
        }
    }

    let origin = loaded.origin.clone();
    let mut session = Session::new(AssessmentEngine::new(loaded.questions)?);

    let mut reporter = ConsoleReporter::new().with_precision(config.precision());
    if args.no_color {
        reporter = reporter.without_colors();
    }

    match args.answers {
        Some(ref answers) => {
            answer_all(&mut session, answers)?;
        }
        None => {
            // Prompts go to stderr when stdout carries JSON
            let stdin = std::io::stdin();
            if args.json {
                run_interactive(&mut session, stdin.lock(), &mut std::io::stderr(), &reporter)?;
            } else {
                run_interactive(&mut session, stdin.lock(), &mut std::io::stdout(), &reporter)?;
            }
        }
    }

    let engine = session.engine();
    if args.json {
        let report = AssessmentReport::from_engine(engine, origin);
        println!("{}", JsonReporter::new().pretty().report(&report));
    } else if args.quiet {
        reporter.report_quiet(&engine.compute_scores(), engine.answered_count());
    } else if args.answers.is_some() {
        reporter.report_results(&engine.compute_scores(), engine.answered_count(), engine.len());
        if args.advice && engine.answered_count() > 0 {
            reporter.report_advice(&engine.advice());
        }
    }

    if engine.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}: answered {} of {} questions",
            "Warning".yellow(),
            engine.answered_count(),
            engine.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(config: &Config) -> Result<LoadedQuestions> {
    let location = config.questions.as_deref().unwrap_or(DEFAULT_QUESTIONS);
    debug!(location, "loading questions");
    let source = source_for(location);
    let loaded = load_questions(source.as_ref(), &QuestionParser::new(), config.invalid_policy())
        .with_context(|| format!("Unusable question file: {}", location))?;
    Ok(loaded)
}

/// Walk the session through the given 1-based answers, in question order
fn answer_all(session: &mut Session, answers: &[usize]) -> Result<()> {
    let total = session.engine().len();
    if answers.len() > total {
        anyhow::bail!(
            "{} answers given but the quiz has {} questions",
            answers.len(),
            total
        );
    }

    session.start()?;
    for (index, &answer) in answers.iter().enumerate() {
        let option = answer
            .checked_sub(1)
            .with_context(|| format!("Answer {} for question {}: options start at 1", answer, index + 1))?;
        session
            .select(option)
            .with_context(|| format!("Invalid answer for question {}", index + 1))?;
        session.next()?;
    }
    info!(answered = answers.len(), total, "answers applied");
    Ok(())
}

/// Drive a session from line input until the user quits or input ends
fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    reporter: &ConsoleReporter,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        match session.state() {
            SessionState::Welcome => {
                writeln!(out, "🌿 Welcome to the Ayurvedic Dosha Assessment!")?;
                writeln!(
                    out,
                    "{} questions. Press Enter to start, q to quit.",
                    session.engine().len()
                )?;
            }
            SessionState::InProgress { .. } => write_question(session, out)?,
            SessionState::Results => {
                let engine = session.engine();
                write!(
                    out,
                    "{}",
                    reporter.render_results(
                        &engine.compute_scores(),
                        engine.answered_count(),
                        engine.len()
                    )
                )?;
                writeln!(out, "a) advice   r) restart   q) quit")?;
            }
            SessionState::Advice => {
                writeln!(out, "b) back to results   r) restart   q) quit")?;
            }
        }
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read input")?;
        let command = line.trim().to_lowercase();
        if command == "q" {
            return Ok(());
        }

        let outcome = match (session.state(), command.as_str()) {
            (SessionState::Welcome, _) => session.start(),
            (SessionState::InProgress { .. }, "b") => session.previous(),
            (SessionState::InProgress { .. }, "n" | "") => session.next(),
            (SessionState::InProgress { .. }, choice) => {
                let count = session
                    .current_question()
                    .map_or(0, |(_, q)| q.options.len());
                match choice.parse::<usize>() {
                    Ok(n) if (1..=count).contains(&n) => {
                        session.select(n - 1).and_then(|_| session.next())
                    }
                    _ => {
                        writeln!(
                            out,
                            "Enter a number from 1 to {}, b to go back, or q to quit.",
                            count
                        )?;
                        Ok(())
                    }
                }
            }
            (SessionState::Results, "a") => match session.show_advice() {
                Ok(advice) => {
                    write!(out, "{}", reporter.render_advice(&advice))?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            (SessionState::Advice, "b") => session.back_to_results(),
            (SessionState::Results | SessionState::Advice, "r") => {
                session.restart();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            writeln!(out, "{}", e)?;
        }
    }
}

fn write_question<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let (Some((_, question)), Some((position, total))) =
        (session.current_question(), session.progress())
    else {
        return Ok(());
    };
    let selected = session.current_answer();

    writeln!(out)?;
    writeln!(out, "Question {} of {}", position, total)?;
    writeln!(out, "{}", question.prompt.bold())?;
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(i) { "*" } else { " " };
        writeln!(out, " {}{}) {}", marker, i + 1, option.text)?;
    }
    let hint = if position == total { "finish" } else { "next" };
    writeln!(out, "Choose 1-{} ({}), b to go back, q to quit:", question.options.len(), hint)?;
    Ok(())
}

fn run_questions(path: Option<&str>, json: bool, config_path: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, config_path)?.merge_with_cli(path, true, None);
    let location = config.questions.as_deref().unwrap_or(DEFAULT_QUESTIONS);

    let text = source_for(location)
        .fetch()
        .with_context(|| format!("Failed to load questions from {}", location))?;
    let questions = QuestionParser::new().parse(&text);

    if let Err(e) = source::validate(&questions) {
        eprintln!("{}: {}: {}", "Invalid".red().bold(), location, e);
        return Ok(ExitCode::from(1));
    }

    let origin = QuestionOrigin::Parsed {
        from: location.to_string(),
    };
    if json {
        println!("{}", JsonReporter::new().pretty().report_questions(&questions, &origin));
    } else {
        ConsoleReporter::new().report_questions(&questions, &origin);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(questions: Option<&str>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let json = default_config_json(questions)?;
    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} {}", "Created".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
