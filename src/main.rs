//! # chatecho CLI
//!
//! Command-line front end for the chatecho library.

use std::fs::OpenOptions;
use std::path::Path;
use std::process;
use std::time::Instant;

use chrono::Local;
use clap::Parser as ClapParser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use chatecho::ChatechoError;
use chatecho::cli::{Args, Command, WotdAction};
use chatecho::config::BotConfig;
use chatecho::core::{ReplaySession, WordOfTheDay, WotdStore, echo_embed, wotd_embed};
use chatecho::corpus::Corpus;
use chatecho::ingest::Ingestor;

fn main() {
    let args = <Args as ClapParser>::parse();

    let config = match &args.config {
        Some(path) => match BotConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => BotConfig::default(),
    };

    let _guard = match init_logging(args.verbose, config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot open log file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(args, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs to stderr and, when configured, appends to a log file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter()),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn run(args: Args, config: &BotConfig) -> Result<(), ChatechoError> {
    let dir = args
        .command
        .dir()
        .map_or_else(|| config.export_dir.clone(), Path::to_path_buf);

    match args.command {
        Command::Stats { json, .. } => stats(&dir, config, json),
        Command::Echo {
            source,
            count,
            seed,
            ..
        } => {
            let mut session = session(&dir, config);
            let mut rng = rng(seed);
            for _ in 0..count {
                match session.echo(source, &mut rng) {
                    Ok(message) => println!("{}\n", echo_embed(&message)),
                    Err(reply) => {
                        println!("{reply}");
                        break;
                    }
                }
            }
            Ok(())
        }
        Command::Simulate { date, seed, .. } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut session = session(&dir, config);
            let mut rng = rng(seed);
            let posts = session.simulate_day(date, &mut rng);

            println!("Scheduled posts for {date}: {}", posts.len());
            for (when, message) in posts {
                println!("\n[{}]\n{}", when.format("%H:%M"), echo_embed(&message));
            }
            Ok(())
        }
        Command::Wotd { action } => wotd(&WotdStore::new(&config.wotd_path), action),
    }
}

fn stats(dir: &Path, config: &BotConfig, json: bool) -> Result<(), ChatechoError> {
    let start = Instant::now();
    let corpus = load(dir, config);
    let stats = corpus.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("chatecho v{}", env!("CARGO_PKG_VERSION"));
    println!("Directory: {}", dir.display());
    println!(
        "Files:     {} seen, {} parsed, {} skipped, {} failed ({:.0}% parsed)",
        stats.files_seen,
        stats.files_parsed,
        stats.files_skipped,
        stats.files_failed,
        stats.parsed_ratio()
    );
    println!(
        "Messages:  {} total, {} Facebook, {} Discord",
        stats.messages, stats.facebook_messages, stats.discord_messages
    );
    if !stats.is_clean() {
        println!("Some files were skipped or failed; see the log for details.");
    }
    println!("Loaded in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn wotd(store: &WotdStore, action: WotdAction) -> Result<(), ChatechoError> {
    let today = Local::now().date_naive();
    match action {
        WotdAction::Show => match store.load_for(today) {
            Some(wotd) => {
                println!("{}", wotd_embed(&wotd));
                info!("Responded to wotd show with: {} - {}", wotd.word, wotd.definition);
            }
            None => {
                println!("Word of the Day is not set yet.");
                info!("wotd show invoked, but Word of the Day is not set yet.");
            }
        },
        WotdAction::Set { word, definition } => {
            store.save(&WordOfTheDay::new(today, word, definition))?;
        }
    }
    Ok(())
}

fn load(dir: &Path, config: &BotConfig) -> Corpus {
    Ingestor::with_config(config.parser.clone()).load(dir)
}

fn session(dir: &Path, config: &BotConfig) -> ReplaySession {
    ReplaySession::new(
        load(dir, config),
        config.schedule.clone(),
        Local::now().date_naive(),
    )
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}
