// Calendar Grid
// Prints a week or month grid of records from a SQLite table

use anyhow::{anyhow, Context};
use calendar_grid::models::grid_cell::CellClasses;
use calendar_grid::models::record::Record;
use calendar_grid::models::time_window::TimeWindow;
use calendar_grid::models::view_mode::ViewMode;
use calendar_grid::services::database::Database;
use calendar_grid::services::grid::{Grid, GridBuilder};
use calendar_grid::services::period::PeriodResolver;
use calendar_grid::services::settings::mapper::calendar_from_settings;
use calendar_grid::services::settings::{default_settings_path, load_settings};
use chrono::{Local, NaiveDate};
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

const USAGE: &str = "Usage: calendar-grid [--config PATH] [--db PATH] [--table NAME] [--mode week|month] [YYYY-MM-DD]";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    config: Option<PathBuf>,
    database: Option<PathBuf>,
    table: Option<String>,
    mode: Option<ViewMode>,
    date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut options = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    options.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("db") => options.database = Some(PathBuf::from(parser.value()?)),
                Arg::Short('t') | Arg::Long("table") => {
                    options.table = Some(parser.value()?.string()?);
                }
                Arg::Short('m') | Arg::Long("mode") => {
                    options.mode = Some(parser.value()?.parse()?);
                }
                Arg::Value(value) if options.date.is_none() => {
                    let value = value.string()?;
                    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                        Ok(date) => options.date = Some(date),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(options))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(options) => run_grid(options),
            Command::Help => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!(
                    "  -c, --config PATH  Settings file [default: {}]",
                    default_settings_path().display()
                );
                println!("      --db PATH      SQLite database to read records from");
                println!("  -t, --table NAME   Table holding the records");
                println!("  -m, --mode MODE    week or month");
                println!("  -h, --help         Display this help message and exit");
                println!("  -V, --version      Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("calendar-grid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn run_grid(options: RunOptions) -> anyhow::Result<()> {
    let config_path = options.config.unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&config_path)?;
    if let Some(table) = options.table {
        settings.table = table;
    }
    if let Some(database) = options.database {
        settings.database = Some(database);
    }
    let mode = options.mode.unwrap_or(settings.view_mode);

    let db_path = settings
        .database
        .clone()
        .context("no database configured, pass --db or set `database` in the settings file")?;
    let db = Database::new(&db_path.to_string_lossy())?;
    let calendar = calendar_from_settings(&settings, db.connection())
        .context("failed to set up calendar")?;
    log::info!(
        "Reading {}.{} as {:?}",
        calendar.table(),
        calendar.date_attribute(),
        calendar.attribute_type()?
    );

    let anchor = options.date.unwrap_or_else(|| Local::now().date_naive());
    let window =
        TimeWindow::for_mode(anchor, mode, settings.first_day_of_week).map_err(|e| anyhow!(e))?;
    let builder = GridBuilder::new(&calendar);
    let grid = match mode {
        ViewMode::Week => builder.build(&window)?,
        ViewMode::Month => builder.build_padded(&window, settings.first_day_of_week)?,
    };

    let resolver = PeriodResolver::new();
    let label = resolver.compact_label(&window);
    println!("{}", label);
    println!(
        "< {} ({})   {} ({}) >",
        label.prev_label(),
        resolver.prev_anchor(&window, mode)?.format("%Y-%m-%d"),
        label.next_label(),
        resolver.next_anchor(&window).format("%Y-%m-%d")
    );
    println!();
    print_grid(&grid, &settings.cell_date_format, &settings.classes);
    Ok(())
}

fn print_grid(grid: &Grid<Record>, date_format: &str, classes: &CellClasses) {
    for week in grid.weeks() {
        for cell in week {
            let titles: Vec<String> = cell.items.iter().map(item_title).collect();
            println!(
                "{:<12} {:<16} {}",
                cell.date_key(date_format),
                cell.classification.css_classes(classes).join(" "),
                titles.join(", ")
            );
        }
        println!();
    }

    for skipped in &grid.skipped {
        eprintln!(
            "skipped record {} ('{}'): {}",
            skipped.item.id, skipped.item.date, skipped.error
        );
    }
}

fn item_title(record: &Record) -> String {
    record
        .text("title")
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", record.id))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    Command::from_parser(Parser::from_env())?.run()
}
