//! Stats command: totals over every logged break.

use std::io::Write;

use anyhow::Result;

use pto_core::{Clock, HistoryStorage, SessionStore};

use super::util::{format_duration, format_money};

pub fn run<W, S, C>(
    writer: &mut W,
    store: &SessionStore<S, C>,
    json: bool,
    currency_symbol: &str,
) -> Result<()>
where
    W: Write,
    S: HistoryStorage,
    C: Clock,
{
    let stats = store.statistics();
    if json {
        serde_json::to_writer_pretty(&mut *writer, &stats)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Breaks taken:  {}", stats.session_count)?;
    writeln!(
        writer,
        "Total earned:  {}",
        format_money(currency_symbol, stats.total_earnings)
    )?;
    writeln!(
        writer,
        "Average break: {}",
        format_duration(stats.average_duration)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone, Utc};
    use insta::assert_snapshot;
    use pto_core::{BreakCategory, ManualClock, MemoryStorage, Mood};

    #[test]
    fn stats_on_empty_history() {
        let store = SessionStore::load(MemoryStorage::new());
        let mut output = Vec::new();
        run(&mut output, &store, false, "$").unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Breaks taken:  0
        Total earned:  $0.00
        Average break: 00:00
        ");
    }

    #[test]
    fn stats_sum_and_average() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap());
        let mut store = SessionStore::load_with_clock(MemoryStorage::new(), clock.clone());
        for (seconds, wage) in [(120, 30.0), (240, 45.0)] {
            store.start_session(wage).unwrap();
            clock.advance(Duration::seconds(seconds));
            store
                .commit_session(BreakCategory::Normal, Mood::Satisfied, "")
                .unwrap();
        }

        let mut output = Vec::new();
        run(&mut output, &store, false, "£").unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Breaks taken:  2
        Total earned:  £4.00
        Average break: 03:00
        ");

        let mut output = Vec::new();
        run(&mut output, &store, true, "£").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["session_count"], 2);
        assert_eq!(value["average_duration"], 180.0);
    }
}
