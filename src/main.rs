use anyhow::{Context, Result};
use clap::Parser;
use flume::Sender;
use handcalc::{Config, Engine, Event, Outcome, ResultFormat, Session, Token};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// A calculator that takes keypad labels or recognized text.
///
/// Each whitespace-separated word that is a keypad label (`AC`, `±`, `%`,
/// `=`, `.`, a digit, `+ - × ÷`) is pressed as a key; anything else is
/// treated as recognized text. With no INPUT, lines are read from stdin.
#[derive(Parser, Debug)]
#[command(name = "handcalc", version, about)]
struct Args {
    /// Config file to use instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render results as the shortest round-trip numeral.
    #[arg(long)]
    shortest: bool,

    /// Treat every line as recognized text, without splitting into keys.
    #[arg(long)]
    text: bool,

    /// Print each snapshot as a JSON line.
    #[arg(long)]
    json: bool,

    /// Log engine activity to stderr.
    #[arg(short, long)]
    verbose: bool,

    inputs: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if args.shortest {
        config.result_format = ResultFormat::Shortest;
    }

    let engine = Engine::with_result_format(config.result_format);
    let (session, events) = Session::new(engine, config.recognition_join);

    let json = args.json;
    let text_mode = args.text;
    let inputs = args.inputs;
    let producer = thread::spawn(move || {
        if inputs.is_empty() {
            read_stdin(&events, text_mode);
        } else {
            for input in &inputs {
                send_line(&events, input, text_mode);
            }
        }
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failure: Option<anyhow::Error> = None;

    session.run(|outcome| {
        if failure.is_some() {
            return;
        }
        if let Err(e) = print_outcome(&mut out, outcome, json) {
            failure = Some(e);
        }
    });

    if producer.join().is_err() {
        anyhow::bail!("Input thread panicked");
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "handcalc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_stdin(events: &Sender<Event>, text_mode: bool) {
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if !send_line(events, &line, text_mode) {
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to read stdin: {e}");
                return;
            }
        }
    }
}

/// Send one line of input. Returns `false` once the session has gone away.
fn send_line(events: &Sender<Event>, line: &str, text_mode: bool) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    if text_mode {
        return events.send(Event::Text(line.to_string())).is_ok();
    }

    line.split_whitespace().all(|word| {
        let event = match Token::from_label(word) {
            Some(token) => Event::Token(token),
            None => Event::Text(word.to_string()),
        };
        events.send(event).is_ok()
    })
}

fn print_outcome(out: &mut impl Write, outcome: &Outcome, json: bool) -> Result<()> {
    if let Outcome::NotRecognized { input, .. } = outcome {
        eprintln!("not recognized: {input}");
        if !json {
            return Ok(());
        }
    }

    if json {
        serde_json::to_writer(&mut *out, outcome.snapshot()).context("Failed to encode snapshot")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", outcome.snapshot().display)?;
    }
    Ok(())
}
