use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

/// One source row: (date, check, account, amount, vendor) in columns B, D, E, F, G.
pub type Row<'a> = (Option<(i32, u32, u32)>, &'a str, &'a str, Option<f64>, &'a str);

fn serial(y: i32, m: u32, d: u32) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    (NaiveDate::from_ymd_opt(y, m, d).unwrap() - epoch).num_days() as f64
}

/// Write a CenterPoint-style listing: a title, a header band on rows 4-5 and
/// `rows` from row 6 on.
pub fn write_listing(dir: &Path, name: &str, rows: &[Row]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("mm/dd/yyyy");
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 1, "Carlisle County Fiscal Court").unwrap();
    sheet.write_string(3, 1, "Check").unwrap();
    sheet.write_string(3, 3, "Check").unwrap();
    sheet.write_string(4, 1, "Date").unwrap();
    sheet.write_string(4, 3, "Number").unwrap();

    for (i, (date, check, account, amount, vendor)) in rows.iter().enumerate() {
        let row = 5 + i as u32;
        if let Some((y, m, d)) = date {
            sheet.write_number_with_format(row, 1, serial(*y, *m, *d), &date_format).unwrap();
        }
        for (col, value) in [(3, check), (4, account), (6, vendor)] {
            if !value.is_empty() {
                sheet.write_string(row, col, *value).unwrap();
            }
        }
        if let Some(amount) = amount {
            sheet.write_number(row, 5, *amount).unwrap();
        }
    }
    workbook.save(&path).unwrap();
    path
}

pub fn standard_listing(dir: &Path) -> PathBuf {
    write_listing(
        dir,
        "checks.xlsx",
        &[
            (Some((2025, 1, 15)), "1001", "100-200", Some(250.0), "ACME SUPPLY"),
            (None, "1002", "100-300", Some(75.5), "HOMETOWN HARDWARE AND SUPPLY COMPANY"),
            (Some((2025, 1, 16)), "1003", "", Some(40.0), "Office Depot"),
            (None, "", "", Some(365.5), ""),
            (Some((2025, 1, 17)), "1004", "100-400", Some(12.0), "Postmaster"),
        ],
    )
}
