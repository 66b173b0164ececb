//! In-memory [`Sheet`]/[`Workbook`] used by the population tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{check_image, Alignment, Border, CellRef, CellValue, ReportError, Sheet, Workbook};

impl CellValue {
    /// The value as a spreadsheet would display it; integral numbers drop `.0`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCell {
    pub value: Option<CellValue>,
    pub alignment: Option<Alignment>,
    pub border: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryImage {
    pub anchor: CellRef,
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
}

/// A sheet held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    pub title: String,
    pub cells: BTreeMap<CellRef, MemoryCell>,
    pub row_heights: BTreeMap<u32, f64>,
    pub images: Vec<MemoryImage>,
}

impl MemorySheet {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn cell(&self, a1: &str) -> Option<&MemoryCell> {
        CellRef::parse(a1).ok().and_then(|at| self.cells.get(&at))
    }

    pub fn text(&self, a1: &str) -> Option<String> {
        CellRef::parse(a1).ok().and_then(|at| self.value(at))
    }

    fn cell_mut(&mut self, at: CellRef) -> &mut MemoryCell {
        self.cells.entry(at).or_default()
    }
}

impl Sheet for MemorySheet {
    fn value(&self, at: CellRef) -> Option<String> {
        self.cells
            .get(&at)
            .and_then(|c| c.value.as_ref())
            .map(CellValue::as_text)
    }

    fn set_value(&mut self, at: CellRef, value: CellValue) {
        self.cell_mut(at).value = Some(value);
    }

    fn set_alignment(&mut self, at: CellRef, alignment: Alignment) {
        self.cell_mut(at).alignment = Some(alignment);
    }

    fn set_border(&mut self, at: CellRef, border: Border) {
        self.cell_mut(at).border = Some(border);
    }

    fn insert_rows(&mut self, before: u32, count: u32) {
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .map(|(at, cell)| {
                let row = if at.row >= before { at.row + count } else { at.row };
                (CellRef::new(at.col, row), cell)
            })
            .collect();
        let heights = std::mem::take(&mut self.row_heights);
        self.row_heights = heights
            .into_iter()
            .map(|(row, h)| (if row >= before { row + count } else { row }, h))
            .collect();
    }

    fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn add_image(
        &mut self,
        anchor: CellRef,
        path: &Path,
        width_px: u32,
        height_px: u32,
    ) -> Result<(), ReportError> {
        check_image(path)?;
        let image = MemoryImage {
            anchor,
            path: path.to_path_buf(),
            width_px,
            height_px,
        };
        match self.images.first_mut() {
            Some(first) => *first = image,
            None => self.images.push(image),
        }
        Ok(())
    }
}

/// Sheets looked up by their title at load time; the first sheet is active.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    pub sheets: Vec<MemorySheet>,
}

impl MemoryWorkbook {
    pub fn with_sheets(sheets: Vec<MemorySheet>) -> Self {
        Self { sheets }
    }
}

impl Workbook for MemoryWorkbook {
    type Sheet = MemorySheet;

    fn active_sheet(&mut self) -> Option<&mut MemorySheet> {
        self.sheets.first_mut()
    }

    fn sheet(&mut self, name: &str) -> Option<&mut MemorySheet> {
        self.sheets.iter_mut().find(|s| s.title == name)
    }
}
