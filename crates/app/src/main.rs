use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{OptionLabel, QuestionDraft};
use services::{Clock, QuestionBankService, QuizLoopService};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_BANK_PATH: &str = "questions.json";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBankPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBankPath { raw } => write!(f, "invalid --bank value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    question_bank: Arc<QuestionBankService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    bank_path: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--bank <path>]");
    eprintln!("  cargo run -p app -- seed [--bank <path>]  # append sample questions");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank {DEFAULT_BANK_PATH}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_bank_path: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut bank_path = env_bank_path
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_BANK_PATH), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBankPath { raw: value });
                    }
                    bank_path = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank_path })
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn sample_questions() -> Vec<QuestionDraft> {
    let draft = |text: &str, category: &str, options: [&str; 4], correct| QuestionDraft {
        text: text.to_string(),
        category: category.to_string(),
        options: options.map(str::to_string),
        correct,
    };
    vec![
        draft(
            "What is the capital of France?",
            "Geography",
            ["Paris", "Lyon", "Marseille", "Nice"],
            OptionLabel::A,
        ),
        draft(
            "Which planet is known as the red planet?",
            "Science",
            ["Venus", "Mars", "Jupiter", "Mercury"],
            OptionLabel::B,
        ),
        draft(
            "How much is 7 × 8?",
            "Mathematics",
            ["54", "58", "56", "64"],
            OptionLabel::C,
        ),
        draft(
            "Who wrote \"Don Quixote\"?",
            "Literature",
            [
                "Lope de Vega",
                "Federico García Lorca",
                "Gabriel García Márquez",
                "Miguel de Cervantes",
            ],
            OptionLabel::D,
        ),
        draft(
            "What is the chemical symbol for water?",
            "Science",
            ["H2O", "CO2", "O2", "NaCl"],
            OptionLabel::A,
        ),
    ]
}

async fn seed(bank: &QuestionBankService) -> Result<usize, Box<dyn std::error::Error>> {
    let mut added = 0;
    for draft in sample_questions() {
        bank.append(draft).await?;
        added += 1;
    }
    Ok(added)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, std::env::var("QUIZ_BANK_PATH").ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    info!(bank = %parsed.bank_path.display(), ?cmd, "starting");

    let storage = Storage::json_file(parsed.bank_path.clone());
    let question_bank = Arc::new(QuestionBankService::open(Arc::clone(&storage.questions)).await);

    match cmd {
        Command::Ui => {
            let quiz_loop = Arc::new(QuizLoopService::new(
                Clock::default_clock(),
                Arc::clone(&question_bank),
            ));
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                question_bank,
                quiz_loop,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let added = seed(&question_bank).await?;
            println!(
                "Added {added} sample questions to {} ({} total).",
                parsed.bank_path.display(),
                question_bank.len().await
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
