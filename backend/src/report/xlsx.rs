//! [`Sheet`]/[`Workbook`] over `umya-spreadsheet`, used for the real templates.

use std::io::Cursor;
use std::path::Path;

use common::model::bast::BastRecord;
use common::model::checklist::CsRecord;
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::Image;
use umya_spreadsheet::{HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet};

use super::{
    bast, check_image, checklist, Alignment, Border, CellRef, CellValue, Horizontal, Line, ReportError, Sheet,
    Vertical, Workbook,
};

/// Drawing extents are in English Metric Units; 96 dpi puts 9525 of them in a pixel.
const EMU_PER_PIXEL: i64 = 9525;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct XlsxWorkbook {
    book: Spreadsheet,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| ReportError::Xlsx(format!("{}: {}", path.display(), e)))?;
        Ok(Self { book })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let mut cursor = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut cursor)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl Workbook for XlsxWorkbook {
    type Sheet = Worksheet;

    fn active_sheet(&mut self) -> Option<&mut Worksheet> {
        Some(self.book.get_active_sheet_mut())
    }

    fn sheet(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.book.get_sheet_by_name_mut(name)
    }
}

fn border_style(line: Option<Line>) -> &'static str {
    match line {
        Some(Line::Thin) => umya_spreadsheet::Border::BORDER_THIN,
        Some(Line::Medium) => umya_spreadsheet::Border::BORDER_MEDIUM,
        None => umya_spreadsheet::Border::BORDER_NONE,
    }
}

impl Sheet for Worksheet {
    fn value(&self, at: CellRef) -> Option<String> {
        let text = self.get_value((at.col, at.row));
        (!text.is_empty()).then_some(text)
    }

    fn set_value(&mut self, at: CellRef, value: CellValue) {
        let cell = self.get_cell_mut((at.col, at.row));
        match value {
            CellValue::Text(text) => {
                cell.set_value(text);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
        }
    }

    fn set_alignment(&mut self, at: CellRef, alignment: Alignment) {
        let mut target = umya_spreadsheet::Alignment::default();
        match alignment.horizontal {
            Some(Horizontal::Left) => {
                target.set_horizontal(HorizontalAlignmentValues::Left);
            }
            Some(Horizontal::Center) => {
                target.set_horizontal(HorizontalAlignmentValues::Center);
            }
            None => {}
        }
        if let Some(Vertical::Center) = alignment.vertical {
            target.set_vertical(VerticalAlignmentValues::Center);
        }
        target.set_wrap_text(alignment.wrap_text);
        self.get_style_mut((at.col, at.row)).set_alignment(target);
    }

    fn set_border(&mut self, at: CellRef, border: Border) {
        let borders = self.get_style_mut((at.col, at.row)).get_borders_mut();
        borders.get_left_mut().set_border_style(border_style(border.left));
        borders.get_right_mut().set_border_style(border_style(border.right));
        borders.get_top_mut().set_border_style(border_style(border.top));
        borders.get_bottom_mut().set_border_style(border_style(border.bottom));
    }

    fn insert_rows(&mut self, before: u32, count: u32) {
        self.insert_new_row(&before, &count);
    }

    fn set_row_height(&mut self, row: u32, height: f64) {
        self.get_row_dimension_mut(&row).set_height(height);
    }

    fn set_title(&mut self, title: &str) {
        self.set_name(title);
    }

    fn add_image(
        &mut self,
        anchor: CellRef,
        path: &Path,
        width_px: u32,
        height_px: u32,
    ) -> Result<(), ReportError> {
        check_image(path)?;
        let path_str = path
            .to_str()
            .ok_or_else(|| ReportError::Xlsx(format!("non UTF-8 image path {}", path.display())))?;
        let mut marker = MarkerType::default();
        marker.set_coordinate(anchor.to_a1());
        let mut image = Image::default();
        image.new_image(path_str, marker);
        if let Some(one_cell) = image.get_one_cell_anchor_mut() {
            let extent = one_cell.get_extent_mut();
            extent.set_cx(i64::from(width_px) * EMU_PER_PIXEL);
            extent.set_cy(i64::from(height_px) * EMU_PER_PIXEL);
        }

        let images = self.get_image_collection_mut();
        if images.is_empty() {
            images.push(image);
        } else {
            images[0] = image;
        }
        Ok(())
    }
}

/// Loads the handover template and fills its active sheet.
pub fn render_bast(template: &Path, record: &BastRecord) -> Result<XlsxWorkbook, ReportError> {
    let mut workbook = XlsxWorkbook::open(template)?;
    let sheet = workbook.active_sheet().ok_or(ReportError::NoActiveSheet)?;
    bast::populate_bast_sheet(sheet, record)?;
    Ok(workbook)
}

/// Loads the checklist template and fills both of its sheets.
pub fn render_checklist(
    template: &Path,
    record: &CsRecord,
    image: Option<&Path>,
) -> Result<XlsxWorkbook, ReportError> {
    let mut workbook = XlsxWorkbook::open(template)?;
    checklist::prepare_workbook(&mut workbook, record, image)?;
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::checklist::{CHECKLIST_SHEET, CHECKLIST_TITLE, SLMON_SHEET};
    use crate::report::put;
    use chrono::NaiveDate;

    fn blank_sheet(book: &mut Spreadsheet) -> &mut Worksheet {
        book.get_sheet_by_name_mut("Sheet1").unwrap()
    }

    fn record() -> CsRecord {
        CsRecord {
            id: 1,
            cs_id: "CS-2024-12-11-1P".into(),
            date: NaiveDate::from_ymd_opt(2024, 12, 11).unwrap(),
            shift: "Pagi".into(),
            jam_pelaksanaan: "06:00 WIB".into(),
            kelompok: "I".into(),
            operator: None,
            operator_name: "Rina".into(),
            gaps: "AAI".into(),
            spikes: String::new(),
            blanks: String::new(),
            slmon: None,
            count_gaps: 1,
            count_spikes: 0,
            count_blanks: 0,
            slmon_image: None,
        }
    }

    fn checklist_template(dir: &Path) -> std::path::PathBuf {
        let mut book = umya_spreadsheet::new_file();
        blank_sheet(&mut book).set_name(CHECKLIST_SHEET);
        book.get_sheet_by_name_mut(CHECKLIST_SHEET)
            .unwrap()
            .get_cell_mut("B7")
            .set_value("AAI");
        book.new_sheet(SLMON_SHEET).unwrap();
        let path = dir.join("cl_seiscomp.xlsx");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path
    }

    #[test]
    fn inserted_rows_push_cells_down() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = blank_sheet(&mut book);
        put(sheet, "C28", "above").unwrap();
        put(sheet, "C29", "below").unwrap();
        sheet.insert_rows(29, 2);
        sheet.set_row_height(29, 31.5);

        assert_eq!(Sheet::value(sheet, CellRef::new(3, 28)).as_deref(), Some("above"));
        assert_eq!(Sheet::value(sheet, CellRef::new(3, 29)), None);
        assert_eq!(Sheet::value(sheet, CellRef::new(3, 31)).as_deref(), Some("below"));
        assert_eq!(*sheet.get_row_dimension(&29).unwrap().get_height(), 31.5);
    }

    #[test]
    fn borders_and_alignment_reach_the_style() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = blank_sheet(&mut book);
        let at = CellRef::new(3, 29);
        sheet.set_border(at, Border::all(Line::Thin));
        sheet.set_alignment(
            at,
            Alignment {
                horizontal: Some(Horizontal::Center),
                vertical: Some(Vertical::Center),
                wrap_text: true,
            },
        );

        let style = sheet.get_style((3, 29));
        let borders = style.get_borders().unwrap();
        assert_eq!(borders.get_left().get_border_style(), "thin");
        assert_eq!(borders.get_bottom().get_border_style(), "thin");
        let alignment = style.get_alignment().unwrap();
        assert_eq!(alignment.get_horizontal(), &HorizontalAlignmentValues::Center);
        assert!(*alignment.get_wrap_text());
    }

    #[test]
    fn image_is_scaled_to_the_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slmon.png");
        image::RgbImage::new(4, 4).save(&path).unwrap();

        let mut book = umya_spreadsheet::new_file();
        let sheet = blank_sheet(&mut book);
        Sheet::add_image(sheet, CellRef::new(2, 3), &path, 826, 397).unwrap();

        let images = sheet.get_image_collection();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].get_coordinate(), "B3");
        let extent = images[0].get_one_cell_anchor().unwrap().get_extent();
        assert_eq!(*extent.get_cx(), 826 * 9525);
        assert_eq!(*extent.get_cy(), 397 * 9525);
    }

    #[test]
    fn undecodable_image_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slmon.png");
        std::fs::write(&path, b"\x89PNG fake").unwrap();

        let mut book = umya_spreadsheet::new_file();
        let sheet = blank_sheet(&mut book);
        let err = Sheet::add_image(sheet, CellRef::new(5, 10), &path, 826, 397).unwrap_err();
        assert!(matches!(err, ReportError::UnreadableImage(_)));
        assert!(sheet.get_image_collection().is_empty());
    }

    #[test]
    fn rendered_checklist_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let template = checklist_template(dir.path());
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a picture").unwrap();

        let bytes = render_checklist(&template, &record(), Some(&broken))
            .unwrap()
            .to_bytes()
            .unwrap();
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();

        let checklist = book.get_sheet_by_name(CHECKLIST_TITLE).unwrap();
        assert_eq!(checklist.get_value("A2"), "SHIFT PAGI");
        assert_eq!(checklist.get_value("D7"), "1");
        let slmon = book.get_sheet_by_name(SLMON_SHEET).unwrap();
        assert_eq!(slmon.get_value("B3"), "Image file not found");
        assert_eq!(slmon.get_value("A2"), "11 Desember 2024, pukul 06:00 WIB");
    }
}
