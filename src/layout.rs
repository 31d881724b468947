//! Fixed positions of the two layouts.
//!
//! Everything the reader, transformer and writer need to know about where a
//! value lives is declared here. All coordinates are zero-based; comments give
//! the spreadsheet address.

/// Column positions in the CenterPoint check listing.
#[derive(Debug, Clone, Copy)]
pub struct SourceColumns {
    pub date: usize,
    pub check_number: usize,
    pub account_number: usize,
    pub amount: usize,
    pub vendor: usize,
}

pub const SOURCE_COLUMNS: SourceColumns = SourceColumns {
    date: 1,           // B
    check_number: 3,   // D
    account_number: 4, // E
    amount: 5,         // F
    vendor: 6,         // G
};

/// Substrings that mark a repeated header band in the check-number column.
pub const HEADER_MARKERS: &[&str] = &["Check", "Number"];

/// Width of the TurningPoint short vendor code.
pub const SHORT_DESCRIPTION_LEN: usize = 20;

pub const DEFAULT_ORGANIZATION: &str = "Carlisle County Fiscal Court";
pub const DEFAULT_CATEGORY: &str = "General";

pub const SHEET_NAME: &str = "Check Register";
pub const DATE_FORMAT: &str = "mm/dd/yyyy";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TitleText {
    /// Serial day number of the report date.
    ReportDate,
    Organization,
    Static(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct TitleCell {
    pub row: u32,
    pub col: u16,
    pub text: TitleText,
}

pub const TITLE_CELLS: &[TitleCell] = &[
    TitleCell { row: 0, col: 0, text: TitleText::ReportDate },                          // A1
    TitleCell { row: 0, col: 5, text: TitleText::Organization },                        // F1
    TitleCell { row: 0, col: 10, text: TitleText::Static("Page -1 of 1") },             // K1
    TitleCell { row: 2, col: 5, text: TitleText::Static("Check Register") },            // F3
    TitleCell { row: 3, col: 5, text: TitleText::Static("Checks with Account Detail") }, // F4
];

/// Column header bands (rows 7 and 8). `None` leaves the cell blank.
pub const HEADER_ROWS: &[(u32, [Option<&str>; 11])] = &[
    (
        6,
        [
            Some("Check"),
            None,
            Some("Check"),
            Some("Bank"),
            Some("Vendor"),
            Some("Vendor"),
            Some("Invoice"),
            Some("Invoice"),
            Some("Invoice"),
            None,
            Some("Check"),
        ],
    ),
    (
        7,
        [
            Some("Number"),
            None,
            Some("Date"),
            Some("Code"),
            Some("Code"),
            Some("Description"),
            Some("Number"),
            Some("Date"),
            Some("Amount"),
            None,
            Some("Amount"),
        ],
    ),
];

/// First record row (row 11).
pub const FIRST_DATA_ROW: u32 = 10;

/// Detail row, account row and one spacer.
pub const ROWS_PER_RECORD: u32 = 3;

/// A value slot in an output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    CheckNumber,
    Date,
    Category,
    ShortVendor,
    Vendor,
    Blank,
    Amount,
    AccountNumber,
    Label(&'static str),
}

pub const DETAIL_ROW: &[(u16, Field)] = &[
    (0, Field::CheckNumber), // A
    (2, Field::Date),        // C
    (3, Field::Category),    // D
    (4, Field::ShortVendor), // E
    (5, Field::Vendor),      // F
    (6, Field::Blank),       // G
    (7, Field::Date),        // H
    (8, Field::Amount),      // I
    (10, Field::Amount),     // K
];

pub const ACCOUNT_ROW: &[(u16, Field)] = &[
    (2, Field::Label("Account:")), // C
    (3, Field::AccountNumber),     // D
    (4, Field::Label("Amount:")),  // E
    (5, Field::Amount),            // F
];
