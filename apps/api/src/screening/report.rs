//! Shortlist table rows and the CSV export.

use csv::{ReaderBuilder, WriterBuilder};
use thiserror::Error;

use crate::models::report::ShortlistRow;
use crate::models::resume::MatchResult;

pub const CSV_FILE_NAME: &str = "shortlisted_resumes.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";
const CSV_HEADER: [&str; 2] = ["Resume", "Match_Score"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts ranked similarities to table rows (score × 100, 2 decimals).
/// Order is preserved.
pub fn to_rows(results: &[MatchResult]) -> Vec<ShortlistRow> {
    results
        .iter()
        .map(|r| ShortlistRow {
            resume: r.name.clone(),
            match_score: to_match_score(r.similarity),
        })
        .collect()
}

pub fn to_match_score(similarity: f32) -> f64 {
    round2(f64::from(similarity) * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Serializes rows as UTF-8 CSV with a `Resume,Match_Score` header.
/// The header is written even when there are no rows.
pub fn write_csv(rows: &[ShortlistRow]) -> Result<Vec<u8>, ReportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}

/// Parses a CSV produced by `write_csv`.
pub fn read_csv(bytes: &[u8]) -> Result<Vec<ShortlistRow>, ReportError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let rows = reader
        .deserialize::<ShortlistRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, similarity: f32) -> MatchResult {
        MatchResult {
            name: name.to_string(),
            similarity,
        }
    }

    #[test]
    fn test_match_score_is_percentage_with_two_decimals() {
        assert_eq!(to_match_score(0.91), 91.0);
        assert_eq!(to_match_score(0.123456), 12.35);
        assert_eq!(to_match_score(0.0), 0.0);
        assert_eq!(to_match_score(1.0), 100.0);
    }

    #[test]
    fn test_to_rows_keeps_order() {
        let rows = to_rows(&[result("b.pdf", 0.91), result("a.pdf", 0.82)]);
        assert_eq!(rows[0].resume, "b.pdf");
        assert_eq!(rows[1].resume, "a.pdf");
        assert_eq!(rows[1].match_score, 82.0);
    }

    #[test]
    fn test_csv_has_exact_header() {
        let bytes = write_csv(&to_rows(&[result("a.pdf", 0.5)])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Resume,Match_Score"));
        assert_eq!(lines.next(), Some("a.pdf,50.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let text = String::from_utf8(write_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.trim_end(), "Resume,Match_Score");
    }

    #[test]
    fn test_csv_reads_back_same_rows() {
        let rows = to_rows(&[
            result("Jane Doe, CV.pdf", 0.9134),
            result("résumé \"final\".pdf", 0.8),
            result("plain.pdf", 0.41999),
        ]);
        let parsed = read_csv(&write_csv(&rows).unwrap()).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_read_csv_rejects_bad_score() {
        let err = read_csv(b"Resume,Match_Score\na.pdf,not-a-number\n").unwrap_err();
        assert!(matches!(err, ReportError::Csv(_)));
    }
}
