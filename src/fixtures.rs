//! Source workbooks for unit tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

use crate::parse::datetime_to_excel_serial;

pub enum Fixture {
    Text(&'static str),
    Number(f64),
    Date(i32, u32, u32),
}

/// Write a single-sheet workbook; each entry is `(row, [(col, value)])`.
pub fn write_workbook(path: &Path, rows: &[(u32, Vec<(u16, Fixture)>)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("mm/dd/yyyy");
    let sheet = workbook.add_worksheet();
    for (row, cells) in rows {
        for (col, value) in cells {
            match value {
                Fixture::Text(s) => {
                    sheet.write_string(*row, *col, *s).unwrap();
                }
                Fixture::Number(n) => {
                    sheet.write_number(*row, *col, *n).unwrap();
                }
                Fixture::Date(y, m, d) => {
                    let dt = NaiveDate::from_ymd_opt(*y, *m, *d).unwrap().and_hms_opt(0, 0, 0).unwrap();
                    sheet
                        .write_number_with_format(*row, *col, datetime_to_excel_serial(dt), &date_format)
                        .unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// A CenterPoint check listing: two title rows, a two-row header band, data
/// from row 5 with one carried date, one record without an account number, a
/// blank row and a totals row.
pub fn check_listing(dir: &Path) -> PathBuf {
    use Fixture::*;
    let path = dir.join("checks.xlsx");
    write_workbook(
        &path,
        &[
            (0, vec![(1, Text("Carlisle County Fiscal Court"))]),
            (1, vec![(1, Text("Check Listing"))]),
            (3, vec![(1, Text("Check")), (3, Text("Check")), (4, Text("Account")), (5, Text("Amount")), (6, Text("Vendor"))]),
            (4, vec![(1, Text("Date")), (3, Text("Number")), (4, Text("Number")), (6, Text("Name"))]),
            (5, vec![(1, Date(2025, 1, 15)), (3, Number(1001.0)), (4, Text("100-200")), (5, Number(250.0)), (6, Text("ACME SUPPLY"))]),
            (6, vec![(3, Number(1002.0)), (4, Text("100-300")), (5, Number(75.5)), (6, Text("HOMETOWN HARDWARE AND SUPPLY COMPANY"))]),
            (7, vec![(1, Date(2025, 1, 16)), (3, Number(1003.0)), (5, Number(40.0)), (6, Text("Office Depot"))]),
            (9, vec![(5, Number(365.5))]),
            (10, vec![(1, Date(2025, 1, 17)), (3, Number(1004.0)), (4, Text("100-400")), (5, Number(12.0)), (6, Text("Postmaster"))]),
        ],
    );
    path
}
