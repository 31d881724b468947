//! Turns a positional source grid into register records.
//!
//! The data region starts at the first row that carries both a date and a
//! check number that is not part of a header band. From there every row that
//! has a check number, account number or vendor becomes a record. Rows missing
//! any of those three fields are still converted but produce a warning. Dates
//! carry forward from the last row that supplied one.

use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::fmt::truncate_chars;
use crate::layout::{HEADER_MARKERS, SHORT_DESCRIPTION_LEN, SOURCE_COLUMNS};
use crate::models::{CellValue, ConversionWarning, OutputRecord, RawGrid, SourceRecord};
use crate::parse::parse_date_mdy;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub data_start_row: usize,
    pub records: Vec<OutputRecord>,
    pub warnings: Vec<ConversionWarning>,
}

impl Extraction {
    pub fn records_converted(&self) -> usize {
        self.records.len()
    }
}

fn is_header_text(text: &str) -> bool {
    HEADER_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Index of the first data row.
pub fn find_data_start(grid: &RawGrid) -> Result<usize> {
    let cols = SOURCE_COLUMNS;
    (0..grid.height())
        .find(|&row| {
            let date = grid.get(row, cols.date);
            let check = grid.get(row, cols.check_number);
            if date.is_empty() || check.is_empty() {
                return false;
            }
            let text = check.to_text();
            !text.is_empty() && !is_header_text(&text)
        })
        .ok_or(ConvertError::NoDataRegion)
}

/// Text dates in M/D/Y form are promoted to real dates.
fn date_value(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) if s.trim().is_empty() => None,
        CellValue::Text(s) => Some(
            parse_date_mdy(s)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(CellValue::Date)
                .unwrap_or_else(|| CellValue::Text(s.trim().to_string())),
        ),
        other => Some(other.clone()),
    }
}

/// Read one source row. Blank and summary rows (no check, account or vendor)
/// yield `None`.
pub fn read_row(grid: &RawGrid, row: usize) -> Option<SourceRecord> {
    let cols = SOURCE_COLUMNS;
    let check = grid.get(row, cols.check_number);
    let account = grid.get(row, cols.account_number);
    let vendor = grid.get(row, cols.vendor);
    if check.is_empty() && account.is_empty() && vendor.is_empty() {
        return None;
    }

    Some(SourceRecord {
        row_index: row,
        date: date_value(grid.get(row, cols.date)),
        check_number: check.to_text(),
        account_number: account.to_text(),
        amount: grid.get(row, cols.amount).to_amount(),
        vendor: vendor.to_text(),
    })
}

impl OutputRecord {
    fn from_source(source: &SourceRecord, date: CellValue) -> Self {
        Self {
            check_number: source.check_number.clone(),
            date,
            short_vendor: truncate_chars(&source.vendor, SHORT_DESCRIPTION_LEN).to_string(),
            vendor: source.vendor.clone(),
            account_number: source.account_number.clone(),
            amount: source.amount,
        }
    }
}

pub fn extract(grid: &RawGrid) -> Result<Extraction> {
    let data_start_row = find_data_start(grid)?;
    info!(row = data_start_row, "found data start");

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut running_date: Option<CellValue> = None;

    for row in data_start_row..grid.height() {
        let Some(source) = read_row(grid, row) else {
            debug!(row, "skipping blank row");
            continue;
        };
        if is_header_text(&source.check_number) {
            debug!(row, check = %source.check_number, "skipping header row");
            continue;
        }

        if let Some(date) = &source.date {
            running_date = Some(date.clone());
        }
        let date = running_date.clone().unwrap_or_default();

        if let Some(warning) = ConversionWarning::for_record(&source) {
            debug!(row, "{warning}");
            warnings.push(warning);
        }
        records.push(OutputRecord::from_source(&source, date));
    }

    info!(records = records.len(), warnings = warnings.len(), "extracted records");
    Ok(Extraction {
        data_start_row,
        records,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MissingField;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use CellValue::{Empty, Number};

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// Build a 7-column row from the five source fields.
    fn row(
        date: CellValue,
        check: CellValue,
        account: CellValue,
        amount: CellValue,
        vendor: CellValue,
    ) -> Vec<CellValue> {
        vec![CellValue::Empty, date, CellValue::Empty, check, account, amount, vendor]
    }

    fn blank() -> Vec<CellValue> {
        vec![CellValue::Empty; 7]
    }

    #[test]
    fn test_no_data_region() {
        let grid = RawGrid::new(vec![
            row(text("Check"), text("Check"), text("Account"), Empty, text("Vendor")),
            row(text("Date"), text("Number"), Empty, Empty, Empty),
            row(Empty, text("1001"), text("100"), Number(5.0), text("ACME")),
        ]);
        assert!(matches!(extract(&grid), Err(ConvertError::NoDataRegion)));
    }

    #[test]
    fn test_empty_grid_has_no_data_region() {
        assert!(matches!(find_data_start(&RawGrid::default()), Err(ConvertError::NoDataRegion)));
    }

    #[test]
    fn test_data_start_skips_check_number_header() {
        let grid = RawGrid::new(vec![
            blank(),
            row(text("Date"), text("Check Number"), Empty, Empty, Empty),
            row(date(2025, 1, 2), Number(1001.0), text("100"), Number(5.0), text("ACME")),
        ]);
        assert_eq!(find_data_start(&grid).unwrap(), 2);
    }

    #[test]
    fn test_date_carries_forward() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("A"), text("100"), Number(1.0), text("ACME")),
            row(Empty, text("B"), text("100"), Number(2.0), text("ACME")),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].date, date(2025, 1, 2));
        assert_eq!(out.records[1].date, date(2025, 1, 2));
    }

    #[test]
    fn test_later_date_replaces_running_date() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("A"), text("1"), Empty, text("V")),
            row(date(2025, 1, 9), text("B"), text("1"), Empty, text("V")),
            row(Empty, text("C"), text("1"), Empty, text("V")),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records[2].date, date(2025, 1, 9));
    }

    #[test]
    fn test_text_dates_are_promoted() {
        let grid = RawGrid::new(vec![row(text("01/15/2025"), text("A"), text("1"), Empty, text("V"))]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records[0].date, date(2025, 1, 15));
    }

    #[test]
    fn test_blank_rows_produce_nothing() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("A"), text("100"), Number(1.0), text("ACME")),
            blank(),
            row(Empty, Empty, Empty, Number(99.0), Empty),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records_converted(), 1);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let grid = RawGrid::new(vec![row(date(2025, 1, 2), text("A"), text("1"), Empty, text("V"))]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records[0].amount, 0.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_warning_for_missing_vendor_and_account() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("1001"), text("100"), Number(1.0), text("ACME")),
            row(Empty, text("1002"), Empty, Number(30.0), Empty),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records_converted(), 2);
        assert_eq!(out.warnings.len(), 1);
        let warning = &out.warnings[0];
        assert_eq!(warning.source_row_index, 1);
        let expected: BTreeSet<_> = [MissingField::AccountNumber, MissingField::Vendor].into();
        assert_eq!(warning.missing_fields, expected);
        assert_eq!(warning.amount, Some(30.0));
        assert_eq!(warning.check_number.as_deref(), Some("1002"));
    }

    #[test]
    fn test_row_without_check_is_kept_with_warning() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("1001"), text("100"), Number(1.0), text("ACME")),
            row(Empty, Empty, text("100-200"), Number(8.0), text("Utility Co")),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records_converted(), 2);
        assert_eq!(out.records[1].check_number, "");
        assert!(out.warnings[0].missing_fields.contains(&MissingField::CheckNumber));
        assert_eq!(out.warnings[0].check_number, None);
    }

    #[test]
    fn test_header_rows_inside_data_are_skipped() {
        let grid = RawGrid::new(vec![
            row(date(2025, 1, 2), text("1001"), text("100"), Number(1.0), text("ACME")),
            row(date(2025, 2, 1), text("Check Number"), text("Account"), Empty, text("Vendor")),
            row(Empty, text("1002"), text("100"), Number(2.0), text("ACME")),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records_converted(), 2);
        // the header's date never becomes the running date
        assert_eq!(out.records[1].date, date(2025, 1, 2));
    }

    #[test]
    fn test_vendor_truncation() {
        let vendor = "Commonwealth Office Supply Partners";
        assert_eq!(vendor.chars().count(), 35);
        let grid = RawGrid::new(vec![row(date(2025, 1, 2), text("1"), text("1"), Empty, text(vendor))]);
        let out = extract(&grid).unwrap();
        assert_eq!(out.records[0].short_vendor, "Commonwealth Office ");
        assert_eq!(out.records[0].vendor, vendor);
    }

    #[test]
    fn test_output_record_carries_register_fields() {
        let grid = RawGrid::new(vec![
            blank(),
            row(date(2025, 1, 2), Number(1001.0), text("100-200"), Number(75.5), text("ACME Hardware")),
        ]);
        let out = extract(&grid).unwrap();
        assert_eq!(
            out.records,
            vec![OutputRecord {
                check_number: "1001".to_string(),
                date: date(2025, 1, 2),
                short_vendor: "ACME Hardware".to_string(),
                vendor: "ACME Hardware".to_string(),
                account_number: "100-200".to_string(),
                amount: 75.5,
            }]
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let grid = RawGrid::new(vec![row(
            date(2025, 1, 2),
            text(" 1001 "),
            text("  100-200"),
            text(" $1,500.25 "),
            text("ACME   "),
        )]);
        let out = extract(&grid).unwrap();
        let rec = &out.records[0];
        assert_eq!(rec.check_number, "1001");
        assert_eq!(rec.account_number, "100-200");
        assert_eq!(rec.vendor, "ACME");
        assert_eq!(rec.amount, 1500.25);
    }

    #[test]
    fn test_check_listing_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = crate::fixtures::check_listing(dir.path());
        let grid = crate::reader::read_grid(&path).unwrap();
        let out = extract(&grid).unwrap();

        assert_eq!(out.data_start_row, 5);
        assert_eq!(out.records_converted(), 4);
        let checks: Vec<_> = out.records.iter().map(|r| r.check_number.as_str()).collect();
        assert_eq!(checks, ["1001", "1002", "1003", "1004"]);
        assert_eq!(out.records[1].date, date(2025, 1, 15));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].source_row_index, 7);
        let expected: BTreeSet<_> = [MissingField::AccountNumber].into();
        assert_eq!(out.warnings[0].missing_fields, expected);
    }
}
