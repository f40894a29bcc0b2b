// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;

use fars_analysis::logging::{init_logging, DEFAULT_LEVEL};
use fars_analysis::FarsConfig;

const USAGE: &str = "\
usage:
  fars summarize <data_dir> <year>... [--json | --view]
  fars map <data_dir> <state> <year>";

fn main() -> Result<()> {
    init_logging(DEFAULT_LEVEL);

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("summarize") => run_summarize(&args[1..]),
        Some("map") => run_map(&args[1..]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_summarize(args: &[String]) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let view = args.iter().any(|a| a == "--view");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let Some(data_dir) = positional.next() else {
        bail!("missing <data_dir>\n{}", USAGE);
    };
    let years: Vec<&str> = positional.map(String::as_str).collect();

    let config = FarsConfig::new(data_dir);
    let summary = config.summarize_years(&years);

    if json {
        println!("{}", summary.to_json().context("Failed to encode summary")?);
    } else if view {
        show_summary(&summary)?;
    } else if summary.is_empty() {
        println!("No accident data for the requested years");
    } else {
        print!("{}", summary);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn show_summary(summary: &fars_analysis::SummaryTable) -> Result<()> {
    ui::run_summary_view(summary)
}

#[cfg(not(feature = "tui"))]
fn show_summary(summary: &fars_analysis::SummaryTable) -> Result<()> {
    eprintln!("TUI mode not available, printing instead");
    print!("{}", summary);
    Ok(())
}

fn run_map(args: &[String]) -> Result<()> {
    let [data_dir, state, year] = args else {
        bail!("expected <data_dir> <state> <year>\n{}", USAGE);
    };
    let config = FarsConfig::new(data_dir);
    draw_map(&config, state, year)
}

#[cfg(feature = "tui")]
fn draw_map(config: &FarsConfig, state: &str, year: &str) -> Result<()> {
    use fars_analysis::MapOutcome;

    let mut canvas = ui::TerminalMapCanvas::new(format!("State {} / {}", state, year));
    let outcome = config
        .map_state(state, year, &mut canvas)
        .with_context(|| format!("Failed to map state {} for {}", state, year))?;

    match outcome {
        MapOutcome::NoAccidents { .. } => {
            println!("No accidents to plot");
            Ok(())
        }
        MapOutcome::Plotted { .. } => ui::run_map_view(&canvas),
    }
}

#[cfg(not(feature = "tui"))]
fn draw_map(config: &FarsConfig, state: &str, year: &str) -> Result<()> {
    let mut canvas = fars_analysis::RecordingCanvas::new();
    let outcome = config
        .map_state(state, year, &mut canvas)
        .with_context(|| format!("Failed to map state {} for {}", state, year))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("Failed to encode map outcome")?
    );
    Ok(())
}
