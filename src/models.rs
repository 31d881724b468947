use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::fmt::money;
use crate::parse::{format_number, parse_amount};

/// A single cell as loaded from the source sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text rendering, empty for blank cells.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => format_number(*n),
            Self::Date(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Self::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Numeric value for the amount column. Blank and unparseable cells are zero.
    pub fn to_amount(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => parse_amount(s),
            Self::Empty | Self::Date(_) => 0.0,
        }
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// The first sheet of a source workbook, addressed by absolute position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Out-of-range positions read as empty.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// One transaction candidate read from a source row.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub row_index: usize,
    pub date: Option<CellValue>,
    pub check_number: String,
    pub account_number: String,
    pub amount: f64,
    pub vendor: String,
}

/// A record ready for the register: one detail row and one account row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub check_number: String,
    pub date: CellValue,
    pub short_vendor: String,
    pub vendor: String,
    pub account_number: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingField {
    CheckNumber,
    AccountNumber,
    Vendor,
}

impl MissingField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CheckNumber => "check number",
            Self::AccountNumber => "account number",
            Self::Vendor => "vendor name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionWarning {
    pub source_row_index: usize,
    pub missing_fields: BTreeSet<MissingField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,
}

impl ConversionWarning {
    /// Returns `None` when all identifying fields are present.
    pub fn for_record(record: &SourceRecord) -> Option<Self> {
        let mut missing_fields = BTreeSet::new();
        if record.check_number.is_empty() {
            missing_fields.insert(MissingField::CheckNumber);
        }
        if record.account_number.is_empty() {
            missing_fields.insert(MissingField::AccountNumber);
        }
        if record.vendor.is_empty() {
            missing_fields.insert(MissingField::Vendor);
        }
        if missing_fields.is_empty() {
            return None;
        }
        Some(Self {
            source_row_index: record.row_index,
            missing_fields,
            amount: (record.amount != 0.0).then_some(record.amount),
            check_number: (!record.check_number.is_empty()).then(|| record.check_number.clone()),
        })
    }

    /// 1-based row number as shown in a spreadsheet program.
    pub fn sheet_row(&self) -> usize {
        self.source_row_index + 1
    }

    pub fn missing_summary(&self) -> String {
        self.missing_fields
            .iter()
            .map(|f| format!("missing {}", f.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}: Transaction imported with {}",
            self.sheet_row(),
            self.missing_summary()
        )?;
        if let Some(amount) = self.amount {
            write!(f, " (Amount: {})", money(amount))?;
        }
        if let Some(check) = &self.check_number {
            write!(f, " (Check: {check})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub records_converted: usize,
    pub warnings: Vec<ConversionWarning>,
}
