//! PDF rendering by handing the populated workbook to a headless LibreOffice.

use std::fs;
use std::path::Path;

use log::{info, warn};
use subprocess::{Exec, Redirection};

use super::ReportError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Tried in order until one produces the PDF.
const OFFICE_CANDIDATES: [&str; 4] = [
    "soffice",
    "libreoffice",
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
];

pub const OFFICE_MISSING: &str = "PDF conversion failed: LibreOffice is not installed or not in PATH.\n\
Please install LibreOffice or add it to your system's PATH.\n\
You can download it from: https://www.libreoffice.org/\n\
After installation, try again.";

/// Converts XLSX bytes to PDF bytes. Blocks until the office process exits.
pub fn xlsx_to_pdf(xlsx: &[u8], stem: &str) -> Result<Vec<u8>, ReportError> {
    convert_with(&OFFICE_CANDIDATES, xlsx, stem)
}

fn convert_with(candidates: &[&str], xlsx: &[u8], stem: &str) -> Result<Vec<u8>, ReportError> {
    let workdir = tempfile::tempdir()?;
    let xlsx_path = workdir.path().join(format!("{stem}.xlsx"));
    let pdf_path = workdir.path().join(format!("{stem}.pdf"));
    fs::write(&xlsx_path, xlsx)?;

    for program in candidates {
        match run_office(program, &xlsx_path, workdir.path()) {
            Ok(()) if pdf_path.is_file() => {
                info!("Converted {} to PDF with {}", stem, program);
                return Ok(fs::read(&pdf_path)?);
            }
            Ok(()) => warn!("{} exited cleanly but wrote no {}", program, pdf_path.display()),
            Err(e) => warn!("{} failed: {}", program, e),
        }
    }
    Err(ReportError::Conversion(OFFICE_MISSING.to_string()))
}

fn run_office(program: &str, xlsx: &Path, outdir: &Path) -> Result<(), String> {
    let capture = Exec::cmd(program)
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf:calc_pdf_Export")
        .arg(xlsx)
        .arg("--outdir")
        .arg(outdir)
        .stdout(Redirection::Pipe)
        .stderr(Redirection::Merge)
        .capture()
        .map_err(|e| e.to_string())?;

    if capture.exit_status.success() {
        Ok(())
    } else {
        Err(format!(
            "{:?}: {}",
            capture.exit_status,
            capture.stdout_str().trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_office_suite_reports_install_hint() {
        let err = convert_with(&["seisops-no-such-office-binary"], b"not really xlsx", "CS-2024-12-11-P")
            .unwrap_err();
        match err {
            ReportError::Conversion(msg) => assert!(msg.contains("LibreOffice is not installed")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
