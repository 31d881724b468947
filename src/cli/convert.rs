use std::path::{Path, PathBuf};
use std::sync::mpsc;

use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, Table};

use checkreg::converter::preview;
use checkreg::error::{ConvertError, Result};
use checkreg::fmt::{count_noun, money};
use checkreg::job::{ConversionJob, ConversionState};
use checkreg::settings::{load_settings, Settings};
use checkreg::{ConversionResult, ConversionWarning, ConvertOptions};

use super::ConvertArgs;

fn parse_report_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConvertError::Other(format!("Invalid --date '{raw}', expected YYYY-MM-DD")))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let settings = load_settings();
    let source = PathBuf::from(&args.source);
    let limit = if args.all_warnings {
        usize::MAX
    } else {
        settings.warning_preview_limit
    };

    if args.dry_run {
        return dry_run(&source, limit, args.json);
    }

    let destination = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.default_destination(&source));
    let options = options_for(&settings, args.date.as_deref())?;

    let (tx, rx) = mpsc::channel();
    let mut job = ConversionJob::with_notifier(tx);
    job.start(source.clone(), destination.clone(), options)?;
    for state in rx.iter() {
        if state == ConversionState::Running && !args.json {
            println!("Converting {} ...", file_name(&source));
        }
        if state.is_finished() {
            break;
        }
    }

    match job.wait() {
        ConversionState::Done(result) if args.json => print_json(&result),
        ConversionState::Done(result) => {
            print_success(&result, &destination);
            print_warnings(&result.warnings, limit);
            Ok(())
        }
        ConversionState::Failed(msg) => Err(ConvertError::Other(format!("Conversion failed: {msg}"))),
        ConversionState::Idle | ConversionState::Running => {
            Err(ConvertError::Other("Conversion did not finish".to_string()))
        }
    }
}

fn options_for(settings: &Settings, date: Option<&str>) -> Result<ConvertOptions> {
    let mut options = ConvertOptions::from_settings(settings);
    if let Some(raw) = date {
        options.report_date = parse_report_date(raw)?;
    }
    Ok(options)
}

fn dry_run(source: &Path, limit: usize, json: bool) -> Result<()> {
    let extraction = preview(source)?;
    if json {
        return print_json(&ConversionResult {
            records_converted: extraction.records_converted(),
            warnings: extraction.warnings,
        });
    }
    println!("Data starts at row {}", extraction.data_start_row + 1);
    println!("Records found: {}", extraction.records_converted());
    print_warnings(&extraction.warnings, limit);
    println!("No file written (dry run).");
    Ok(())
}

fn print_json(result: &ConversionResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).map_err(|e| ConvertError::Other(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_success(result: &ConversionResult, destination: &Path) {
    println!("{}", "File converted successfully!".green().bold());
    println!();
    println!("Records converted: {}", result.records_converted);
    println!("File saved as: {}", file_name(destination));
}

fn print_warnings(warnings: &[ConversionWarning], limit: usize) {
    if warnings.is_empty() {
        return;
    }

    println!();
    println!(
        "{} ({})",
        "WARNINGS - Manual data entry required".yellow().bold(),
        count_noun(warnings.len(), "warning")
    );

    let mut table = Table::new();
    table.set_header(vec!["Row", "Check", "Amount", "Missing"]);
    for w in warnings.iter().take(limit) {
        table.add_row(vec![
            Cell::new(w.sheet_row()),
            Cell::new(w.check_number.as_deref().unwrap_or("")),
            Cell::new(w.amount.map(money).unwrap_or_default()),
            Cell::new(w.missing_summary()),
        ]);
    }
    println!("{table}");

    if let Some(line) = overflow_line(warnings.len(), limit) {
        println!("{line}");
    }
    println!("Please review the converted file and manually enter missing data.");
}

fn overflow_line(total: usize, limit: usize) -> Option<String> {
    let hidden = total.checked_sub(limit).filter(|&n| n > 0)?;
    let noun = if hidden == 1 { "warning" } else { "warnings" };
    Some(format!("... and {hidden} more {noun}."))
}
