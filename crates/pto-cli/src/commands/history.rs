//! History command: the break diary.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use pto_core::{Clock, HistoryStorage, Session, SessionStore, Statistics};

use super::util::{format_duration, format_money};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Show at most this many breaks.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// A session plus its derived numbers, for JSON output.
#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    #[serde(flatten)]
    session: &'a Session,
    duration_secs: f64,
    earnings: f64,
}

pub fn run<W, S, C>(
    writer: &mut W,
    store: &SessionStore<S, C>,
    args: &HistoryArgs,
    currency_symbol: &str,
) -> Result<()>
where
    W: Write,
    S: HistoryStorage,
    C: Clock,
{
    let sessions: Vec<&Session> = store
        .history()
        .iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();

    if args.json {
        let entries: Vec<HistoryEntry<'_>> = sessions
            .iter()
            .map(|&session| HistoryEntry {
                session,
                duration_secs: session.duration(),
                earnings: session.earnings(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        return Ok(());
    }

    if sessions.is_empty() {
        if store.history().is_empty() {
            writeln!(writer, "No breaks logged yet.")?;
        } else {
            writeln!(writer, "No breaks match.")?;
        }
        return Ok(());
    }

    writeln!(writer, "Break diary")?;
    for session in &sessions {
        write_session_line(writer, session, currency_symbol)?;
    }

    let shown: Vec<Session> = sessions.into_iter().cloned().collect();
    let stats = Statistics::from_sessions(&shown);
    writeln!(
        writer,
        "{} breaks, {} earned, average {}",
        stats.session_count,
        format_money(currency_symbol, stats.total_earnings),
        format_duration(stats.average_duration)
    )?;
    Ok(())
}

fn write_session_line<W: Write>(writer: &mut W, session: &Session, currency_symbol: &str) -> Result<()> {
    let category = session
        .category
        .map_or_else(String::new, |c| format!("{} {c}", c.icon()));
    let mood = session
        .mood
        .map_or_else(String::new, |m| format!("{} {m}", m.icon()));
    write!(
        writer,
        "- {}  {}  {}  {}  {}",
        session.start_time.format("%Y-%m-%d %H:%MZ"),
        format_duration(session.duration()),
        format_money(currency_symbol, session.earnings()),
        category,
        mood
    )?;
    if !session.notes.is_empty() {
        write!(writer, "  {}", session.notes)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone, Utc};
    use insta::assert_snapshot;
    use pto_core::{BreakCategory, ManualClock, MemoryStorage, Mood};

    fn populated_store() -> SessionStore<MemoryStorage, ManualClock> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap());
        let mut store = SessionStore::load_with_clock(MemoryStorage::new(), clock.clone());

        store.start_session(30.0).unwrap();
        clock.advance(Duration::seconds(90));
        store
            .commit_session(BreakCategory::Quick, Mood::Satisfied, "")
            .unwrap();

        clock.set(Utc.with_ymd_and_hms(2026, 1, 16, 14, 30, 0).unwrap());
        store.start_session(60.0).unwrap();
        clock.advance(Duration::seconds(630));
        store
            .commit_session(BreakCategory::Marathon, Mood::Victorious, "read the whole news")
            .unwrap();
        store
    }

    fn args() -> HistoryArgs {
        HistoryArgs {
            limit: None,
            json: false,
        }
    }

    #[test]
    fn history_lists_newest_first() {
        let store = populated_store();
        let mut output = Vec::new();
        run(&mut output, &store, &args(), "$").unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Break diary
        - 2026-01-16 14:30Z  10:30  $10.50  🏃 Marathon  💪 Victorious  read the whole news
        - 2026-01-15 09:00Z  01:30  $0.75  ⚡ Quick  😊 Satisfied
        2 breaks, $11.25 earned, average 06:00
        ");
    }

    #[test]
    fn history_respects_limit() {
        let store = populated_store();
        let mut output = Vec::new();
        let args = HistoryArgs {
            limit: Some(1),
            ..args()
        };
        run(&mut output, &store, &args, "$").unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Marathon"));
        assert!(!output.contains("Quick"));
        assert!(output.contains("1 breaks"));
    }

    #[test]
    fn zero_limit_on_populated_history() {
        let store = populated_store();
        let mut output = Vec::new();
        let args = HistoryArgs {
            limit: Some(0),
            ..args()
        };
        run(&mut output, &store, &args, "$").unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"No breaks match.");
    }

    #[test]
    fn empty_history_message() {
        let store = SessionStore::load(MemoryStorage::new());
        let mut output = Vec::new();
        run(&mut output, &store, &args(), "$").unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"No breaks logged yet.");
    }

    #[test]
    fn history_json_includes_derived_values() {
        let store = populated_store();
        let mut output = Vec::new();
        let args = HistoryArgs {
            limit: Some(1),
            json: true,
            ..args()
        };
        run(&mut output, &store, &args, "$").unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let entry = &value[0];
        assert_eq!(entry["category"], "Marathon");
        assert_eq!(entry["mood"], "Victorious");
        assert_eq!(entry["duration_secs"], 630.0);
        assert_eq!(entry["earnings"], 10.5);
        assert_eq!(entry["start_time"], "2026-01-16T14:30:00Z");
    }
}
