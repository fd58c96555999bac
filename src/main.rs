use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wordsworld::catalog::WordCatalog;
use wordsworld::config::Config;
use wordsworld::engine::{ProgressStore, StudyEngine};
use wordsworld::session::question::{OptionId, QuestionState, SessionItem};
use wordsworld::session::study::SessionSettings;
use wordsworld::session::summary::SessionSummary;
use wordsworld::store::json_store::JsonStore;

#[derive(Parser)]
#[command(
    name = "wordsworld",
    version,
    about = "Vocabulary flashcard trainer with per-word progress tracking"
)]
struct Cli {
    #[arg(short, long, help = "Number of words per session")]
    words: Option<usize>,

    #[arg(short, long, help = "Word catalog JSON file (defaults to the built-in list)")]
    catalog: Option<PathBuf>,

    #[arg(long, help = "Wrong answers allowed before the answer is revealed")]
    max_attempts: Option<u32>,

    #[arg(long, help = "Directory holding progress and history files")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Seed for word selection and option order")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run one study session (default)
    Study,
    /// List progress for every reviewed word
    Records,
    /// List completed sessions
    History,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load config")?;
    if let Some(words) = cli.words {
        config.session_word_count = words;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.to_string_lossy().to_string());
    }
    config.validate();

    let progress = ProgressStore::load(Box::new(open_store(&config)?));

    match cli.command.unwrap_or(Command::Study) {
        Command::Study => {
            let catalog = match config.catalog_path() {
                Some(path) => WordCatalog::from_path(&path)?,
                None => WordCatalog::builtin(),
            };
            let mut engine = StudyEngine::new(progress, SessionSettings::from(&config));
            if let Some(seed) = cli.seed {
                engine = engine.with_seed(seed);
            }
            if let Some(summary) = run_study(&mut engine, &catalog, &config)? {
                let history_store = open_store(&config)?;
                let mut history = history_store.load_session_history();
                history.sessions.push(summary);
                history_store
                    .save_session_history(&history)
                    .context("failed to save session history")?;
            }
        }
        Command::Records => print_records(&progress),
        Command::History => print_history(&open_store(&config)?),
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<JsonStore> {
    match config.data_dir() {
        Some(dir) => JsonStore::with_base_dir(dir),
        None => JsonStore::new(),
    }
}

/// Returns `None` when there was nothing to study or the learner quit early.
fn run_study(
    engine: &mut StudyEngine,
    catalog: &WordCatalog,
    config: &Config,
) -> Result<Option<SessionSummary>> {
    let mut session = engine.start_session(catalog.words(), config.session_word_count);
    if session.is_empty() {
        println!("No words available. Please check your word file.");
        return Ok(None);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = session.len();

    while let Some(item) = session.current_item().cloned() {
        println!();
        println!("[{}/{}] {}", session.current_index() + 1, total, item.word.word);
        println!(
            "has reviewed count: {}",
            engine.review_count(&item.word.word)
        );

        loop {
            // Options may be regenerated after a wrong answer.
            let current = session.current_item().cloned().unwrap_or_else(|| item.clone());
            print_options(&current);
            let Some(line) = prompt(&mut lines, "Your choice (q to quit): ")? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            let Ok(number) = line.parse::<usize>() else {
                println!("Enter an option number.");
                continue;
            };

            let choice = OptionId(number.wrapping_sub(1));
            let outcome = engine.submit_answer(&mut session, choice)?;
            if let Some(err) = &outcome.persist_error {
                eprintln!("warning: progress was not saved: {err}");
            }

            match outcome.state {
                QuestionState::ResolvedCorrect => {
                    println!("Correct!");
                    thread::sleep(Duration::from_millis(config.auto_advance_delay_ms));
                    break;
                }
                QuestionState::ResolvedIncorrect => {
                    println!(
                        "Wrong. The correct answer is {}.",
                        outcome.correct_answer.meaning
                    );
                    if prompt(&mut lines, "Press Enter for the next word. ")?.is_none() {
                        return Ok(None);
                    }
                    break;
                }
                QuestionState::Retry | QuestionState::Pending => {
                    let used = session.current_item().map(|i| i.attempts).unwrap_or(0);
                    let left = config.max_attempts.saturating_sub(used);
                    println!("Wrong, try again ({left} attempt(s) left).");
                }
            }
        }

        engine.advance(&mut session)?;
    }

    println!();
    println!("You've completed all words!");
    let summary = engine.finish_session(session)?;
    println!(
        "Words: {}  Correct: {}  Attempts: {}  Accuracy: {:.0}%  Duration: {} min",
        summary.word_count,
        summary.total_correct,
        summary.total_attempts,
        summary.accuracy(),
        summary.duration_mins()
    );
    Ok(Some(summary))
}

fn print_options(item: &SessionItem) {
    for (i, option) in item.options.iter().enumerate() {
        match &option.image_name {
            Some(image) => println!("  {}. {} [{image}]", i + 1, option.meaning),
            None => println!("  {}. {}", i + 1, option.meaning),
        }
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn print_records(progress: &ProgressStore) {
    if progress.is_empty() {
        println!("No word records yet.");
        return;
    }
    println!(
        "{:<20} {:>7} {:>8} {:<10} {}",
        "word", "reviews", "correct", "mark", "last reviewed"
    );
    for record in progress.records() {
        let last = record
            .last_reviewed_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:>7} {:>8} {:<10} {}",
            record.text,
            record.review_count,
            record.correct_count,
            record.state.as_str(),
            last
        );
    }
}

fn print_history(store: &JsonStore) {
    let history = store.load_session_history();
    if history.sessions.is_empty() {
        println!("No completed sessions yet.");
        return;
    }
    for session in &history.sessions {
        println!(
            "Date: {}  Word Count: {}  Correct: {}/{}  Duration: {} mins",
            session.date_completed.format("%Y-%m-%d"),
            session.word_count,
            session.total_correct,
            session.total_attempts,
            session.duration_mins()
        );
    }
}
