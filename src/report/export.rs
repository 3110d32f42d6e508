//! CSV export of the attendance report

use super::{ReportError, ReportRow};

/// Download name used by both front ends
pub const REPORT_FILENAME: &str = "attendance_report.csv";

/// Header row of the exported file
pub const CSV_HEADER: [&str; 3] = ["Employee Name", "Days Present", "Days Absent"];

/// Serialize report rows as CSV, one line per row in the given order
pub fn to_csv(rows: &[ReportRow]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for row in rows {
        let present = row.present.to_string();
        let absent = row.absent.to_string();
        writer.write_record([row.name.as_str(), present.as_str(), absent.as_str()])?;
    }

    writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}
