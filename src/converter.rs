use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::layout::{DEFAULT_CATEGORY, DEFAULT_ORGANIZATION};
use crate::models::ConversionResult;
use crate::reader::read_grid;
use crate::settings::Settings;
use crate::transform::{extract, Extraction};
use crate::writer::write_register;

/// Values the register needs beyond the source rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Date shown in the register title. Also pins the document creation time.
    pub report_date: NaiveDate,
    pub organization: String,
    pub category: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            report_date: chrono::Local::now().date_naive(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            organization: settings.organization_name.clone(),
            category: settings.category_label.clone(),
            ..Self::default()
        }
    }
}

pub fn convert(source: &Path, destination: &Path) -> Result<ConversionResult> {
    convert_with(source, destination, &ConvertOptions::default())
}

/// Read, transform and write. Nothing is written unless the whole pipeline
/// succeeds.
pub fn convert_with(source: &Path, destination: &Path, options: &ConvertOptions) -> Result<ConversionResult> {
    let extraction = preview(source)?;
    write_register(&extraction.records, destination, options)?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        records = extraction.records_converted(),
        warnings = extraction.warnings.len(),
        "conversion complete"
    );
    Ok(ConversionResult {
        records_converted: extraction.records_converted(),
        warnings: extraction.warnings,
    })
}

/// Read and transform without writing anything.
pub fn preview(source: &Path) -> Result<Extraction> {
    let grid = read_grid(source)?;
    extract(&grid)
}
