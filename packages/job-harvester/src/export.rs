//! Optional CSV artifact of the raw scraped batch, for offline inspection.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::JobRecord;

pub const CSV_HEADER: &[&str] = &[
    "created_date",
    "job_title",
    "company",
    "salary",
    "address",
    "link",
    "time_remaining",
    "description",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn record_row(record: &JobRecord) -> [String; 8] {
    [
        record.created_date.map(|d| d.to_string()).unwrap_or_default(),
        record.title.clone(),
        record.company.clone().unwrap_or_default(),
        record.raw_salary.clone().unwrap_or_default(),
        record.raw_address.clone().unwrap_or_default(),
        record.link.clone(),
        record.time_remaining.clone().unwrap_or_default(),
        record.description.clone().unwrap_or_default(),
    ]
}

/// Write the batch as a comma-delimited file with a header row.
pub fn write_csv(path: &Path, records: &[JobRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_rows(&mut writer, records)?;

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, records: &[JobRecord]) -> io::Result<()> {
    write_row(&mut *writer, CSV_HEADER)?;
    for record in records {
        let row = record_row(record);
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(&mut *writer, &cells)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{DetailInfo, ListingSummary};

    #[test]
    fn header_and_quoting() {
        let record = JobRecord::from_parts(
            ListingSummary {
                link: "https://example.vn/viec-lam/1".to_string(),
                title: "Lập trình viên \"Java\"".to_string(),
                company: Some("Công ty A, B".to_string()),
                raw_salary: Some("10 - 20 triệu".to_string()),
                raw_address: None,
                created_date_text: None,
            },
            DetailInfo {
                time_remaining: Some("Còn 10 ngày".to_string()),
                description: None,
            },
            NaiveDate::from_ymd_opt(2025, 6, 12),
        );

        let mut buf: Vec<u8> = Vec::new();
        write_rows(&mut buf, &[record]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("created_date,job_title,company,salary,address,link,time_remaining,description")
        );
        assert_eq!(
            lines.next(),
            Some(
                "2025-06-12,\"Lập trình viên \"\"Java\"\"\",\"Công ty A, B\",10 - 20 triệu,,https://example.vn/viec-lam/1,Còn 10 ngày,"
            )
        );
    }
}
