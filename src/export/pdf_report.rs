//! Report "PDF" - a single line of text under a PDF content type.
//! Not a structurally valid PDF document.

use chrono::{DateTime, TimeZone};

use crate::export::ExportFile;

pub const PDF_FILE_NAME: &str = "report.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Build the report file for the given generation time
pub fn pdf_export<Tz: TimeZone>(generated_at: DateTime<Tz>) -> ExportFile
where
    Tz::Offset: std::fmt::Display,
{
    let body = format!(
        "People Analytics Report - {}",
        generated_at.format("%-m/%-d/%Y, %-I:%M:%S %p")
    );
    ExportFile {
        file_name: PDF_FILE_NAME.to_string(),
        content_type: PDF_CONTENT_TYPE.to_string(),
        bytes: body.into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_placeholder_body() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        let file = pdf_export(at);
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.file_name, "report.pdf");
        assert_eq!(
            String::from_utf8(file.bytes).unwrap(),
            "People Analytics Report - 3/1/2024, 3:04:05 PM"
        );
    }
}
