use std::io::{self, Write};

use anyhow::Result;
use minesweep_core::{Bucket, HighScoreStore, HighScoreTable};
use time::OffsetDateTime;

use crate::store::JsonFileStore;

pub fn show(store: &JsonFileStore, json: bool) -> Result<()> {
    let table = store.load();
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &table)?;
        writeln!(out)?;
    } else {
        write_tables(&table, &mut out)?;
    }
    Ok(())
}

fn write_tables(table: &HighScoreTable, out: &mut impl Write) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(out, "No high scores yet.");
    }

    for bucket in Bucket::all() {
        let entries = table.entries(bucket);
        if entries.is_empty() {
            continue;
        }
        writeln!(out, "{} / {}", bucket.mode, bucket.difficulty)?;
        for (rank, entry) in entries.iter().enumerate() {
            let date = OffsetDateTime::from_unix_timestamp(entry.timestamp)
                .map(|at| at.date().to_string())
                .unwrap_or_default();
            writeln!(
                out,
                "{:>3}. {:<4}{:>5}s  {:<20} {}",
                rank + 1,
                entry.initials,
                entry.time,
                entry.name,
                date
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
