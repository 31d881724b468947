use std::io::Write as _;
use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use tempfile::NamedTempFile;
use tracing::info;

use crate::converter::ConvertOptions;
use crate::error::{ConvertError, Result};
use crate::layout::{
    Field, TitleText, ACCOUNT_ROW, DATE_FORMAT, DETAIL_ROW, FIRST_DATA_ROW, HEADER_ROWS,
    ROWS_PER_RECORD, SHEET_NAME, TITLE_CELLS,
};
use crate::models::{CellValue, OutputRecord};
use crate::parse::{datetime_to_excel_serial, title_serial};

fn field_value(field: Field, record: &OutputRecord, options: &ConvertOptions) -> CellValue {
    let text = |s: &str| CellValue::Text(s.to_string());
    match field {
        Field::CheckNumber => text(&record.check_number),
        Field::Date => record.date.clone(),
        Field::Category => text(&options.category),
        Field::ShortVendor => text(&record.short_vendor),
        Field::Vendor => text(&record.vendor),
        Field::Blank => CellValue::Empty,
        Field::Amount => CellValue::Number(record.amount),
        Field::AccountNumber => text(&record.account_number),
        Field::Label(label) => text(label),
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    date_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Date(dt) => {
            sheet.write_number_with_format(row, col, datetime_to_excel_serial(*dt), date_format)?;
        }
    }
    Ok(())
}

fn write_title(sheet: &mut Worksheet, options: &ConvertOptions) -> std::result::Result<(), XlsxError> {
    for cell in TITLE_CELLS {
        match cell.text {
            TitleText::ReportDate => {
                sheet.write_number(cell.row, cell.col, title_serial(options.report_date) as f64)?;
            }
            TitleText::Organization => {
                sheet.write_string(cell.row, cell.col, &options.organization)?;
            }
            TitleText::Static(s) => {
                sheet.write_string(cell.row, cell.col, s)?;
            }
        }
    }
    for (row, labels) in HEADER_ROWS {
        for (col, label) in labels.iter().enumerate() {
            if let Some(label) = label {
                sheet.write_string(*row, col as u16, *label)?;
            }
        }
    }
    Ok(())
}

/// Render the check register to an in-memory `.xlsx`.
///
/// The document creation time is pinned to the report date so the same input
/// and options always produce the same bytes.
pub fn render(records: &[OutputRecord], options: &ConvertOptions) -> std::result::Result<Vec<u8>, XlsxError> {
    let date = options.report_date;
    let created = ExcelDateTime::from_ymd(date.year() as u16, date.month() as u8, date.day() as u8)?;

    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    write_title(sheet, options)?;

    let mut row = FIRST_DATA_ROW;
    for record in records {
        for (offset, layout) in [DETAIL_ROW, ACCOUNT_ROW].into_iter().enumerate() {
            for &(col, field) in layout {
                let value = field_value(field, record, options);
                write_cell(sheet, row + offset as u32, col, &value, &date_format)?;
            }
        }
        row += ROWS_PER_RECORD;
    }

    workbook.save_to_buffer()
}

/// Render and save the register. The file is staged next to `destination` and
/// renamed into place, so a failure leaves nothing behind.
pub fn write_register(records: &[OutputRecord], destination: &Path, options: &ConvertOptions) -> Result<()> {
    let write_error = |detail: String| ConvertError::Write(format!("{}: {detail}", destination.display()));

    let bytes = render(records, options).map_err(|e| write_error(e.to_string()))?;

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
    staged
        .write_all(&bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| write_error(e.to_string()))?;
    staged
        .persist(destination)
        .map_err(|e| write_error(e.error.to_string()))?;

    info!(path = %destination.display(), bytes = bytes.len(), "saved check register");
    Ok(())
}
