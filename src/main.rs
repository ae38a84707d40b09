use chrono::{Datelike, NaiveDate};

use postdeck::config::PostdeckConfig;
use postdeck::grid::{self, MonthGridState};
use postdeck::storage::FileStorage;
use postdeck::workspace::Workspace;

fn main() {
    let config = PostdeckConfig::load(&PostdeckConfig::default_path());

    // Set up logging to the systemd user journal (`journalctl --user -t postdeck -f`).
    // Wrapper filters: postdeck crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                if metadata.target().starts_with("postdeck") {
                    let max = if postdeck::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
            let journal = journal.with_syslog_identifier("postdeck".to_string());
            postdeck::set_debug_logging(config.debug_logging);
            if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
                // Global max must be Debug so debug logs can pass through when toggled
                log::set_max_level(log::LevelFilter::Debug);
            }
        }
    }

    if let Err(e) = config.ensure_dirs() {
        eprintln!("Cannot create data directory {}: {e}", config.storage_dir().display());
        std::process::exit(1);
    }

    let workspace = Workspace::load(FileStorage::new(config.storage_dir()));

    let today = chrono::Local::now().date_naive();
    let mut state = MonthGridState::default();

    // --month YYYY-MM shows another month
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|a| a == "--month") {
        match args.get(pos + 1).and_then(|v| parse_month(v)) {
            Some(first) => state = MonthGridState::for_month(first),
            None => {
                eprintln!("Usage: postdeck [--month YYYY-MM]");
                std::process::exit(2);
            }
        }
    }

    let cells = grid::month_grid(&state, &workspace.store, today);

    println!("{}", state.displayed_month.format("%B %Y"));
    println!("  Mo  Tu  We  Th  Fr  Sa  Su");
    for week in cells.chunks(7) {
        let row: Vec<String> = week.iter().map(format_cell).collect();
        println!("{}", row.join(""));
    }

    let mut busy: Vec<_> = cells.iter().filter(|c| !c.chips.is_empty()).collect();
    busy.sort_by_key(|c| c.day);
    if busy.is_empty() {
        println!("\nNo events this month.");
        return;
    }

    println!();
    for cell in busy {
        println!("{}", cell.day.date().format("%A %b %e"));
        for chip in &cell.chips {
            println!("  {:<10} {}", chip.platform.display_name(), chip.label);
        }
    }
}

/// A day cell as a 3-column number plus a marker: `*` for today, `.` for a
/// day with events, `-` for lead/trail days of the adjacent months.
fn format_cell(cell: &grid::DayCell) -> String {
    let day = cell.day.date().day();
    let marker = if cell.is_today {
        '*'
    } else if !cell.chips.is_empty() {
        '.'
    } else if !cell.in_month {
        '-'
    } else {
        ' '
    };
    format!("{day:>3}{marker}")
}

fn parse_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
