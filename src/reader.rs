use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::models::{CellValue, RawGrid};
use crate::parse::{parse_iso_datetime, MAX_SERIAL};

/// Load the first sheet of a workbook positionally. Row 0 is the first sheet
/// row and column 0 is column A, even when the used range starts further in.
pub fn read_grid(path: &Path) -> Result<RawGrid> {
    let read_error = |detail: String| ConvertError::Read(format!("{}: {detail}", path.display()));

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook contains no sheets".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    let grid = grid_from_range(&range);
    info!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = grid.height(),
        "loaded source sheet"
    );
    Ok(grid)
}

fn grid_from_range(range: &Range<Data>) -> RawGrid {
    let Some((first_row, first_col)) = range.start() else {
        debug!("source sheet is empty");
        return RawGrid::default();
    };
    let (first_row, first_col) = (first_row as usize, first_col as usize);
    let (height, width) = range.get_size();

    let mut rows = vec![vec![CellValue::Empty; first_col + width]; first_row + height];
    for (r, c, data) in range.used_cells() {
        rows[first_row + r][first_col + c] = cell_value(data);
    }
    RawGrid::new(rows)
}

/// Serials follow the workbook's own date system (1900 or 1904). Durations
/// and out-of-range serials stay numeric.
fn date_time_value(dt: &ExcelDateTime) -> CellValue {
    let serial = dt.as_f64();
    if dt.is_duration() || !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return CellValue::Number(serial);
    }
    dt.as_datetime()
        .map(CellValue::Date)
        .unwrap_or(CellValue::Number(serial))
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => date_time_value(dt),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
    }
}
