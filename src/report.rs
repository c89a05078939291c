use crate::error::Result;
use crate::models::CheckReport;
use std::path::Path;

const RULE_WIDTH: usize = 60;
const SUBRULE_WIDTH: usize = 40;

/// Human-readable end-of-run summary: counts, then each available book
pub fn format_summary(report: &CheckReport) -> String {
    let mut output = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    output.push_str(&format!("\n{rule}\nSUMMARY\n{rule}\n"));
    output.push_str(&format!("\nAvailable now: {}\n", report.available.len()));
    output.push_str(&format!(
        "Not available/found: {}\n",
        report.unavailable.len()
    ));

    if report.available.is_empty() {
        return output;
    }

    output.push_str("\n📚 AVAILABLE BOOKS:\n");
    output.push_str(&"-".repeat(SUBRULE_WIDTH));
    output.push('\n');

    for book in &report.available {
        output.push_str(&format!("  • {}\n", book.goodreads_title));
        output.push_str(&format!("    by {}\n", book.goodreads_author));
        output.push_str(&format!(
            "    Format: {} | Copies: {}/{}\n",
            book.format, book.available_copies, book.total_copies
        ));
        output.push_str(&format!("    {}\n\n", book.url));
    }

    output
}

/// Write the report as indented JSON
pub fn save_json<P: AsRef<Path>>(report: &CheckReport, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path.as_ref(), content)?;
    log::info!("Saved report to {}", path.as_ref().display());
    Ok(())
}

/// Read a report written by [`save_json`]
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<CheckReport> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckerError;
    use crate::models::{AvailableBook, UnavailableBook};

    fn sample_report() -> CheckReport {
        CheckReport {
            available: vec![AvailableBook {
                goodreads_title: "Dune".to_string(),
                goodreads_author: "Frank Herbert".to_string(),
                library_title: "Dune".to_string(),
                format: "BK".to_string(),
                available_copies: 2,
                total_copies: 3,
                url: "https://acl.bibliocommons.com/v2/record/S1C1".to_string(),
                branch_available: Some(true),
            }],
            unavailable: vec![
                UnavailableBook {
                    title: "Piranesi".to_string(),
                    author: "Susanna Clarke".to_string(),
                },
                UnavailableBook {
                    title: "Foundation".to_string(),
                    author: "Isaac Asimov".to_string(),
                },
            ],
        }
    }

    #[test]
    fn summary_lists_counts_and_available_books() {
        let summary = format_summary(&sample_report());

        assert!(summary.contains("SUMMARY"));
        assert!(summary.contains("Available now: 1"));
        assert!(summary.contains("Not available/found: 2"));
        assert!(summary.contains("  • Dune\n    by Frank Herbert\n"));
        assert!(summary.contains("    Format: BK | Copies: 2/3\n"));
        assert!(summary.contains("    https://acl.bibliocommons.com/v2/record/S1C1\n"));
        assert!(!summary.contains("Piranesi"));
    }

    #[test]
    fn summary_without_available_books_skips_listing() {
        let summary = format_summary(&CheckReport::default());

        assert!(summary.contains("Available now: 0"));
        assert!(summary.contains("Not available/found: 0"));
        assert!(!summary.contains("AVAILABLE BOOKS"));
    }

    #[test]
    fn save_then_load_reproduces_report() {
        let report = sample_report();
        let tmp = tempfile::NamedTempFile::new().unwrap();

        save_json(&report, tmp.path()).unwrap();
        let loaded = load_json(tmp.path()).unwrap();

        assert_eq!(loaded, report);
    }

    #[test]
    fn saved_json_has_available_and_unavailable_keys() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        save_json(&sample_report(), tmp.path()).unwrap();

        let content = std::fs::read_to_string(tmp.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(content.contains("\n  \"available\": ["), "should be indented");
        assert_eq!(value["available"][0]["goodreads_title"], "Dune");
        assert_eq!(value["available"][0]["available"], 2);
        assert_eq!(value["available"][0]["total"], 3);
        assert_eq!(value["unavailable"][1]["author"], "Isaac Asimov");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        match load_json("/nonexistent/report.json") {
            Err(CheckerError::Io(_)) => {}
            other => panic!("Expected CheckerError::Io, got: {other:?}"),
        }
    }
}
