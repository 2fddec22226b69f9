//! Rule-based linter for E2G prediction files in the standard exchange
//! format: a gzip-compressed tab-delimited table with an optional
//! `# key: value` metadata header.
//!
//! Validation never mutates the file. Data errors (wrong column names, bad
//! chromosome notation, negative coordinates, blank scores) make a file
//! invalid; metadata problems and vocabulary drift are advisory warnings.

pub mod errors;
pub mod metadata;
pub mod report;
pub mod rules;

use std::io::BufRead;
use std::path::Path;

use e2g_core::utils::get_dynamic_reader;

use crate::metadata::MetadataScanner;
use crate::rules::RowChecker;

// re-exports
pub use errors::ValidateError;
pub use report::ValidationReport;

///
/// Validate one prediction file against the standard-format rules.
///
/// # Arguments
/// - path: the prediction file (tsv or tsv.gz)
/// - check_all_rows: keep scanning after the first findings instead of
///   stopping early; every rule category still reports at most once
///
pub fn validate_file(path: &Path, check_all_rows: bool) -> Result<ValidationReport, ValidateError> {
    let reader =
        get_dynamic_reader(path).map_err(|e| ValidateError::FileReadError(e.to_string()))?;

    let mut metadata = MetadataScanner::new();
    let mut checker: Option<RowChecker> = None;
    let mut report = ValidationReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        match &mut checker {
            None => {
                let stripped = line.trim();
                if stripped.is_empty() {
                    continue;
                }
                if stripped.starts_with('#') {
                    metadata.scan_line(stripped, line_number);
                    continue;
                }

                // first non-comment line is the column header
                let (row_checker, header_errors) = RowChecker::from_header(&line);
                report.data_errors.extend(header_errors);
                if !row_checker.has_columns() {
                    // nothing recognizable to validate row-by-row
                    break;
                }
                checker = Some(row_checker);
            }
            Some(row_checker) => {
                row_checker.check_row(&line, line_number, &mut report);
                if !check_all_rows
                    && (!report.data_errors.is_empty() || !report.data_warnings.is_empty())
                {
                    break;
                }
            }
        }
    }

    report.metadata_warnings = metadata.finish();

    Ok(report)
}
