//! Report population over a minimal spreadsheet model.
//!
//! The populators in [`bast`] and [`checklist`] only talk to the [`Sheet`] and
//! [`Workbook`] traits: read a template cell, write a value, style a cell,
//! insert rows, size a row, embed a picture. [`xlsx`] implements them for the
//! real templates; [`MemoryWorkbook`] implements them for tests.

pub mod bast;
pub mod checklist;
pub mod locale;
pub mod pdf;
pub mod xlsx;

#[cfg(test)]
mod memory;
#[cfg(test)]
pub use memory::{MemorySheet, MemoryWorkbook};

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static SHIFT_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d)([DPSM])$").expect("valid shift ordinal pattern"));

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid cell address '{0}'")]
    InvalidCell(String),
    #[error("template has no sheet named '{0}'")]
    MissingSheet(String),
    #[error("template has no active sheet")]
    NoActiveSheet,
    #[error("events table could not be read: {0}")]
    Events(#[from] csv::Error),
    #[error("spreadsheet error: {0}")]
    Xlsx(String),
    #[error("{0}")]
    Conversion(String),
    #[error("unreadable image {0}")]
    UnreadableImage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A 1-based (column, row) cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> Self {
        Self { row, col }
    }

    /// Parses an A1-style address such as `J4` or `AB12`.
    pub fn parse(a1: &str) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidCell(a1.to_string());
        let split = a1.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
        let (letters, digits) = a1.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid());
        }
        let col = letters
            .bytes()
            .fold(0u32, |acc, b| acc * 26 + u32::from(b - b'A' + 1));
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Self { row, col })
    }

    /// The A1-style address of this cell.
    pub fn to_a1(self) -> String {
        let mut letters = Vec::new();
        let mut col = self.col;
        while col > 0 {
            let rem = (col - 1) % 26;
            letters.push(b'A' + rem as u8);
            col = (col - 1) / 26;
        }
        letters.reverse();
        format!("{}{}", String::from_utf8_lossy(&letters), self.row)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Numbers for numeric-looking fields, text otherwise.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Center,
}

/// Replaces a cell's whole alignment when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: Option<Horizontal>,
    pub vertical: Option<Vertical>,
    pub wrap_text: bool,
}

impl Alignment {
    pub fn centered() -> Self {
        Self {
            horizontal: Some(Horizontal::Center),
            vertical: Some(Vertical::Center),
            wrap_text: false,
        }
    }

    pub fn left() -> Self {
        Self {
            horizontal: Some(Horizontal::Left),
            vertical: Some(Vertical::Center),
            wrap_text: false,
        }
    }

    pub fn wrapped() -> Self {
        Self {
            horizontal: None,
            vertical: Some(Vertical::Center),
            wrap_text: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Thin,
    Medium,
}

/// Replaces a cell's whole border when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub left: Option<Line>,
    pub right: Option<Line>,
    pub top: Option<Line>,
    pub bottom: Option<Line>,
}

impl Border {
    pub fn all(line: Line) -> Self {
        Self {
            left: Some(line),
            right: Some(line),
            top: Some(line),
            bottom: Some(line),
        }
    }
}

pub trait Sheet {
    /// Displayed text of a cell, `None` when empty.
    fn value(&self, at: CellRef) -> Option<String>;
    fn set_value(&mut self, at: CellRef, value: CellValue);
    fn set_alignment(&mut self, at: CellRef, alignment: Alignment);
    fn set_border(&mut self, at: CellRef, border: Border);
    /// Shifts row `before` and everything below it down by `count` rows.
    fn insert_rows(&mut self, before: u32, count: u32);
    fn set_row_height(&mut self, row: u32, height: f64);
    fn set_title(&mut self, title: &str);
    /// Anchors a picture at `anchor`, replacing the sheet's first picture if it has one.
    /// Fails with [`ReportError::UnreadableImage`] when the file does not decode.
    fn add_image(
        &mut self,
        anchor: CellRef,
        path: &Path,
        width_px: u32,
        height_px: u32,
    ) -> Result<(), ReportError>;
}

pub trait Workbook {
    type Sheet: Sheet;

    fn active_sheet(&mut self) -> Option<&mut Self::Sheet>;
    fn sheet(&mut self, name: &str) -> Option<&mut Self::Sheet>;
}

/// Decodes the picture at `path` once so a broken upload never reaches the writer.
pub fn check_image(path: &Path) -> Result<(), ReportError> {
    image::open(path)
        .map(|_| ())
        .map_err(|e| ReportError::UnreadableImage(format!("{}: {e}", path.display())))
}

/// Writes `value` at an A1 address.
pub fn put<S: Sheet + ?Sized>(
    sheet: &mut S,
    a1: &str,
    value: impl Into<CellValue>,
) -> Result<(), ReportError> {
    sheet.set_value(CellRef::parse(a1)?, value.into());
    Ok(())
}

/// Identifier used for download file names: the shift ordinal before the
/// trailing shift code is dropped, so `BAST-2024-12-11-1P` becomes `BAST-2024-12-11-P`.
pub fn simplify_record_id(id: &str) -> String {
    SHIFT_ORDINAL.replace(id, "-$2").into_owned()
}

/// Reads the ISO date embedded in a record identifier such as
/// `BAST-2024-12-11-1P`: everything after the `prefix_len`-character prefix
/// and before the 3-character shift suffix. Falls back to `fallback` when
/// that slice is not a date.
pub fn date_from_record_id(id: &str, prefix_len: usize, fallback: NaiveDate) -> NaiveDate {
    id.len()
        .checked_sub(3)
        .and_then(|end| id.get(prefix_len..end))
        .and_then(|slice| NaiveDate::parse_from_str(slice, "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}
