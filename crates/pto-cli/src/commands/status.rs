//! Status command for showing configuration and stored history.

use std::io::Write;

use anyhow::Result;

use pto_core::{HISTORY_KEY, SessionStore};
use pto_db::Database;

use super::util::format_wage;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, db: Database, config: &Config) -> Result<()> {
    let last_saved = db.updated_at(HISTORY_KEY)?;
    let store = SessionStore::load(db);

    writeln!(writer, "Break timer status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(
        writer,
        "Wage:     {}",
        format_wage(&config.currency_symbol, config.hourly_wage)
    )?;

    match last_saved {
        Some(saved) => {
            writeln!(writer, "Breaks:   {}", store.history().len())?;
            writeln!(writer, "Saved:    {saved}")?;
        }
        None => writeln!(writer, "No breaks logged yet.")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use pto_core::{BreakCategory, Mood};

    fn config(database_path: std::path::PathBuf) -> Config {
        Config {
            database_path,
            hourly_wage: 25.0,
            currency_symbol: "$".to_string(),
            tick_interval_ms: 100,
        }
    }

    #[test]
    fn status_on_fresh_database() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("pto.db");
        let db = Database::open(&db_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, db, &config(db_path.clone())).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&db_path.display().to_string(), "[TEMP]/pto.db");
        assert_snapshot!(output, @r"
        Break timer status
        Database: [TEMP]/pto.db
        Wage:     $25.00/hr
        No breaks logged yet.
        ");
    }

    #[test]
    fn status_counts_saved_breaks() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("pto.db");
        {
            let db = Database::open(&db_path).unwrap();
            let mut store = SessionStore::load(db);
            store.start_session(25.0).unwrap();
            store
                .commit_session(BreakCategory::Sticky, Mood::Zen, "")
                .unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let mut output = Vec::new();
        run(&mut output, db, &config(db_path)).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Breaks:   1"));
        assert!(output.contains("Saved:    "));
    }
}
