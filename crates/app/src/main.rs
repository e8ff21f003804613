use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use quiz_core::model::{Difficulty, QuizSettings};
use services::{Clock, QuizDriver, QuizService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::{Input, Renderer};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidBankPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
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

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app play  [--bank <path>] [--seed <u64>] [--time-per-question <secs>]");
    eprintln!("            [--hints <n>] [--tiers <a,b,c>] [-v...]");
    eprintln!("  app tiers [--bank <path>] [--tiers <a,b,c>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank assets/quiz_data.json");
    eprintln!("  --tiers easy,medium,hard");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Tiers,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "tiers" => Some(Self::Tiers),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    bank_path: PathBuf,
    seed: Option<u64>,
    time_per_question_secs: Option<u64>,
    hints: Option<u32>,
    tiers: Option<String>,
    verbose: u8,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut bank_path = env("QUIZ_BANK_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("assets/quiz_data.json"), PathBuf::from);
        let mut seed = env("QUIZ_SEED").and_then(|value| value.trim().parse::<u64>().ok());
        let mut time_per_question_secs = None;
        let mut hints = None;
        let mut tiers = None;
        let mut verbose = 0_u8;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBankPath { raw: value });
                    }
                    bank_path = PathBuf::from(value);
                }
                "--seed" => {
                    seed = Some(parse_number(require_value(args, "--seed")?, "--seed")?);
                }
                "--time-per-question" => {
                    let value = require_value(args, "--time-per-question")?;
                    time_per_question_secs = Some(parse_number(value, "--time-per-question")?);
                }
                "--hints" => {
                    hints = Some(parse_number(require_value(args, "--hints")?, "--hints")?);
                }
                "--tiers" => {
                    tiers = Some(require_value(args, "--tiers")?);
                }
                "-v" | "--verbose" => verbose = verbose.saturating_add(1),
                "-vv" => verbose = verbose.saturating_add(2),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank_path,
            seed,
            time_per_question_secs,
            hints,
            tiers,
            verbose,
        })
    }

    fn settings(&self) -> Result<QuizSettings, quiz_core::Error> {
        let mut settings = QuizSettings::default();
        if let Some(secs) = self.time_per_question_secs {
            settings = settings.with_time_per_question(Duration::from_secs(secs))?;
        }
        if let Some(hints) = self.hints {
            settings = settings.with_hints_per_session(hints);
        }
        if let Some(raw) = self.tiers.as_deref() {
            let tiers = raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(Difficulty::new)
                .collect::<Result<Vec<_>, _>>()?;
            settings = settings.with_tiers(tiers)?;
        }
        Ok(settings)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter(), |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    init_tracing(parsed.verbose);

    let settings = parsed.settings()?;
    let service = QuizService::from_bank_file(Clock::system(), &parsed.bank_path, settings)?
        .with_seed(parsed.seed);
    info!(bank = %parsed.bank_path.display(), "question bank ready");

    match cmd {
        Command::Tiers => {
            for (tier, count) in service.tier_counts() {
                println!("{tier:<10} {count}");
            }
            println!("{:<10} {}", "total", service.total_questions());
            Ok(())
        }
        Command::Play => play(&service).await,
    }
}

async fn play(service: &QuizService) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let (engine, initial) = service.start_session();
        let mut running = QuizDriver::new(engine).spawn(initial);
        let mut renderer = Renderer::new();

        loop {
            tokio::select! {
                event = running.events.recv() => match event {
                    Some(event) => renderer.render(&event),
                    None => break,
                },
                line = lines.next_line() => match line? {
                    Some(line) => {
                        // The driver may already be gone; late input is dropped.
                        let _ = match renderer.interpret(&line) {
                            Some(Input::Answer(label)) => running.commands.answer(label),
                            Some(Input::Hint) => running.commands.use_hint(),
                            Some(Input::Quit) => running.commands.abandon(),
                            None => Ok(()),
                        };
                    }
                    None => {
                        let _ = running.commands.abandon();
                    }
                },
            }
        }

        match running.task.await? {
            Some(result) if result.is_empty() => {
                println!("No quiz available: the question bank has no questions.");
                return Ok(());
            }
            Some(_) => {}
            None => return Ok(()),
        }

        println!();
        println!("[k] Keep learning   [m] Main menu (quit)");
        match lines.next_line().await? {
            Some(choice) if matches!(choice.trim(), "k" | "K" | "y" | "Y") => continue,
            _ => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
