//! Reformat a CenterPoint check listing into the TurningPoint check-register
//! import layout.
//!
//! The pipeline is [`reader`] -> [`transform`] -> [`writer`], driven by
//! [`converter::convert`]. Interactive callers go through [`job::ConversionJob`].

pub mod converter;
pub mod error;
pub mod fmt;
pub mod job;
pub mod layout;
pub mod models;
pub mod parse;
pub mod reader;
pub mod settings;
pub mod transform;
pub mod writer;

#[cfg(test)]
mod fixtures;

pub use converter::{convert, convert_with, ConvertOptions};
pub use error::{ConvertError, Result};
pub use models::{ConversionResult, ConversionWarning, MissingField};
