//! Live break timer.
//!
//! One task owns the store and the engine and multiplexes three inputs:
//! the redraw ticker, a line from stdin, and Ctrl-C. The ticker is dropped
//! as soon as the loop exits, so nothing keeps ticking after a stop or
//! cancel.

use std::future::Future;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;

use pto_core::{
    BreakCategory, BreakError, Clock, ElapsedSnapshot, HistoryStorage, HourlyWage, Mood,
    Session, SessionStore, TimerEngine,
};

use super::util::{format_duration, format_money, format_wage, progress_bar};
use crate::Config;

#[derive(Debug, Args)]
pub struct BreakArgs {
    /// What kind of break this is.
    #[arg(long, default_value_t = BreakCategory::Normal)]
    pub category: BreakCategory,

    /// How the break went.
    #[arg(long, default_value_t = Mood::Satisfied)]
    pub mood: Mood,

    /// Free-form notes.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Hourly wage for this break, overriding the configured one.
    #[arg(long)]
    pub wage: Option<f64>,
}

/// How a break ended.
#[derive(Debug)]
pub enum Outcome {
    /// Logged to history. `save_error` is set if the write-through failed.
    Committed {
        session: Session,
        save_error: Option<String>,
    },
    Cancelled(ElapsedSnapshot),
}

/// Runs an interactive break against the real terminal.
pub fn run<S: HistoryStorage, W: Write>(
    writer: &mut W,
    store: &mut SessionStore<S>,
    args: &BreakArgs,
    config: &Config,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    let mut engine = TimerEngine::new();
    let wage = HourlyWage::new(args.wage.unwrap_or(config.hourly_wage))?;

    writeln!(
        writer,
        "On the clock at {}. Enter to log the break, `c` + Enter to cancel.",
        format_wage(&config.currency_symbol, wage.value())
    )?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let outcome = runtime.block_on(drive(
        writer,
        store,
        &mut engine,
        args,
        wage.value(),
        config,
        stdin,
        interrupt,
    ));
    // A pending stdin read sits on a blocking thread that cannot be
    // cancelled; dropping the runtime normally would wait for the next line.
    runtime.shutdown_background();
    write_outcome(writer, &outcome?, &config.currency_symbol)
}

/// Starts a session, redraws it every tick, and commits or cancels it
/// depending on the first line of `input` or `interrupt`.
///
/// End of input counts as Enter.
#[expect(clippy::too_many_arguments, reason = "collaborators are injected for tests")]
pub async fn drive<S, C, W, R, I>(
    writer: &mut W,
    store: &mut SessionStore<S, C>,
    engine: &mut TimerEngine<C>,
    args: &BreakArgs,
    wage: f64,
    config: &Config,
    input: R,
    interrupt: I,
) -> Result<Outcome>
where
    S: HistoryStorage,
    C: Clock,
    W: Write,
    R: AsyncBufRead + Unpin,
    I: Future<Output = ()>,
{
    store.start_session(wage)?;
    let session = store
        .active_session()
        .context("session missing right after start")?;
    engine.track(session)?;

    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = input.lines();
    tokio::pin!(interrupt);

    let cancelled = loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(snapshot) = engine.tick() {
                    draw(writer, &snapshot, &config.currency_symbol)?;
                }
            }
            line = lines.next_line() => {
                let line = line.context("failed to read from stdin")?;
                break line.as_deref().is_some_and(is_cancel);
            }
            () = &mut interrupt => break true,
        }
    };
    drop(ticker);
    writeln!(writer)?;

    if cancelled {
        let snapshot = engine.cancel();
        store.cancel_session();
        return Ok(Outcome::Cancelled(snapshot));
    }

    engine.stop();
    let save_error = match store.commit_session(args.category, args.mood, args.notes.clone()) {
        Ok(()) => None,
        Err(BreakError::Persistence(err)) => Some(err.to_string()),
        Err(err) => return Err(err.into()),
    };
    let session = store
        .history()
        .first()
        .cloned()
        .context("committed session missing from history")?;
    Ok(Outcome::Committed {
        session,
        save_error,
    })
}

fn is_cancel(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "c" | "cancel")
}

fn draw<W: Write>(writer: &mut W, snapshot: &ElapsedSnapshot, currency_symbol: &str) -> Result<()> {
    write!(
        writer,
        "\r⏱  {}  {}  {}",
        format_duration(snapshot.elapsed),
        format_money(currency_symbol, snapshot.earnings),
        progress_bar(snapshot.progress()),
    )?;
    writer.flush()?;
    Ok(())
}

/// Prints the result of a break.
pub fn write_outcome<W: Write>(writer: &mut W, outcome: &Outcome, currency_symbol: &str) -> Result<()> {
    match outcome {
        Outcome::Committed {
            session,
            save_error,
        } => {
            let category = session.category.unwrap_or_default();
            let mood = session.mood.unwrap_or_default();
            writeln!(
                writer,
                "Break logged: {} {}  {} {}",
                category.icon(),
                category,
                mood.icon(),
                mood
            )?;
            writeln!(writer, "Duration: {}", format_duration(session.duration()))?;
            writeln!(
                writer,
                "Earned:   {}",
                format_money(currency_symbol, session.earnings())
            )?;
            if !session.notes.is_empty() {
                writeln!(writer, "Notes:    {}", session.notes)?;
            }
            if let Some(err) = save_error {
                writeln!(
                    writer,
                    "Warning: this break may not survive a restart ({err})"
                )?;
            }
        }
        Outcome::Cancelled(snapshot) => {
            writeln!(
                writer,
                "Break cancelled after {}. Nothing logged.",
                format_duration(snapshot.elapsed)
            )?;
        }
    }
    Ok(())
}
