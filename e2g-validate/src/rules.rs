use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::report::ValidationReport;

/// Columns a standard-format prediction file must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "ElementChr",
    "ElementStart",
    "ElementEnd",
    "ElementName",
    "ElementClass",
    "GeneSymbol",
    "GeneEnsemblID",
    "GeneTSS",
    "SampleSummaryShort",
    "Score",
];

const ALLOWED_ELEMENT_CLASSES: [&str; 3] = ["promoter", "genic", "intergenic"];

/// Streaming per-row rule checker. Each rule category reports its first
/// violating row only, so a million bad rows still produce one line of
/// feedback per problem.
pub struct RowChecker {
    columns: HashMap<&'static str, usize>,
    reported: HashSet<&'static str>,
    chr_pattern: Regex,
    ensembl_pattern: Regex,
}

impl RowChecker {
    /// Analyze the header line: resolve the positions of correctly named
    /// required columns and report the missing ones, suggesting the closest
    /// unrecognized column name as a likely typo.
    pub fn from_header(line: &str) -> (Self, Vec<String>) {
        let actual: Vec<&str> = line.split('\t').map(|c| c.trim()).collect();

        let mut columns: HashMap<&'static str, usize> = HashMap::new();
        for column in REQUIRED_COLUMNS {
            if let Some(position) = actual.iter().position(|a| *a == column) {
                columns.insert(column, position);
            }
        }

        let extra: Vec<&str> = actual
            .iter()
            .copied()
            .filter(|a| !REQUIRED_COLUMNS.contains(a))
            .collect();

        let mut errors: Vec<String> = Vec::new();
        for column in REQUIRED_COLUMNS {
            if columns.contains_key(column) {
                continue;
            }
            let suggestion = match closest_match(column, &extra) {
                Some(found) => format!(" Closest matching column found: '{}'.", found),
                None => String::new(),
            };
            errors.push(format!(
                "Missing Column: The required column '{}' was not found.{}",
                column, suggestion
            ));
        }

        let checker = RowChecker {
            columns,
            reported: HashSet::new(),
            chr_pattern: Regex::new(r"^chr((?:[1-9]|1\d|2[0-2])|[XYM])$").unwrap(),
            ensembl_pattern: Regex::new(r"^ENS[A-Z]{1,5}\d{11}(?:\.\d+)?$").unwrap(),
        };

        (checker, errors)
    }

    /// True when at least one required column was located; without any,
    /// row checking is pointless.
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Apply every rule to one data row.
    pub fn check_row(&mut self, line: &str, line_number: usize, report: &mut ValidationReport) {
        let fields: Vec<&str> = line.split('\t').collect();
        let columns = &self.columns;
        let field = |column: &str| columns.get(column).and_then(|&i| fields.get(i)).copied();

        // ElementChr must be in Gencode/UCSC notation
        if let Some(value) = field("ElementChr") {
            if !self.reported.contains("ElementChr") && !self.chr_pattern.is_match(value.trim()) {
                report.data_errors.push(format!(
                    "Invalid Format [L{}]: 'ElementChr' value '{}' is not in Gencode/UCSC notation. Possible values: [chr1, chr2, ..., chr22, chrX, chrY, chrM]",
                    line_number, value
                ));
                self.reported.insert("ElementChr");
            }
        }

        // coordinates must be present, nonnegative integers
        for (column, blank_category, value_category) in [
            ("ElementStart", "ElementStart_nan", "ElementStart_value"),
            ("ElementEnd", "ElementEnd_nan", "ElementEnd_value"),
        ] {
            let Some(value) = field(column) else { continue };
            if is_blank(value) {
                if !self.reported.contains(blank_category) {
                    report.data_errors.push(format!(
                        "Missing Value [L{}]: '{}' coordinate is required and cannot be blank.",
                        line_number, column
                    ));
                    self.reported.insert(blank_category);
                }
            } else if value.trim().parse::<u64>().is_err()
                && !self.reported.contains(value_category)
            {
                report.data_errors.push(format!(
                    "Invalid Value [L{}]: '{}' coordinate must be a nonnegative integer, but found '{}'.",
                    line_number, column, value
                ));
                self.reported.insert(value_category);
            }
        }

        // free-text identifier columns may not be empty
        for column in ["ElementName", "GeneSymbol", "SampleSummaryShort"] {
            let Some(value) = field(column) else { continue };
            if !self.reported.contains(column) && value.trim().is_empty() {
                report.data_errors.push(format!(
                    "Invalid Value [L{}]: Column '{}' cannot be blank or empty.",
                    line_number, column
                ));
                self.reported.insert(column);
            }
        }

        // ElementClass outside the vocabulary is advisory only
        if let Some(value) = field("ElementClass") {
            if !self.reported.contains("ElementClass")
                && !is_blank(value)
                && !ALLOWED_ELEMENT_CLASSES.contains(&value.trim().to_lowercase().as_str())
            {
                report.data_warnings.push(format!(
                    "Data Warning [L{}]: 'ElementClass' has an unrecognized value '{}'. Allowed values are [promoter, genic, intergenic].",
                    line_number, value
                ));
                self.reported.insert("ElementClass");
            }
        }

        // GeneEnsemblID format (blank tolerated, format errors are not)
        if let Some(value) = field("GeneEnsemblID") {
            if !self.reported.contains("GeneEnsemblID")
                && !is_blank(value)
                && !self.ensembl_pattern.is_match(value.trim())
            {
                report.data_errors.push(format!(
                    "Invalid Format [L{}]: 'GeneEnsemblID' value '{}' is not a valid Ensembl ID format (e.g., ENSG00000136997).",
                    line_number, value
                ));
                self.reported.insert("GeneEnsemblID");
            }
        }

        // GeneTSS: negatives are errors, blanks merely warn
        if let Some(value) = field("GeneTSS") {
            if is_blank(value) {
                if !self.reported.contains("GeneTSS_blank")
                    && !self.reported.contains("GeneTSS_negative")
                {
                    report.data_warnings.push(format!(
                        "Data Warning [L{}]: 'GeneTSS' should not contain blank/NaN values.",
                        line_number
                    ));
                    self.reported.insert("GeneTSS_blank");
                }
            } else if value.trim().parse::<u64>().is_err()
                && !self.reported.contains("GeneTSS_negative")
            {
                report.data_errors.push(format!(
                    "Invalid Value [L{}]: 'GeneTSS' must be a nonnegative coordinate, not {}.",
                    line_number, value
                ));
                self.reported.insert("GeneTSS_negative");
            }
        }

        // Score must be a number on every row
        if let Some(value) = field("Score") {
            if !self.reported.contains("Score")
                && (is_blank(value) || value.trim().parse::<f64>().is_err())
            {
                report.data_errors.push(format!(
                    "Invalid Value [L{}]: 'Score' column cannot contain blank or NaN values.",
                    line_number
                ));
                self.reported.insert("Score");
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || matches!(trimmed, "NA" | "NaN" | "nan")
}

/// Closest candidate to `target` by normalized edit distance, if any clears
/// the 0.7 similarity cutoff.
fn closest_match<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (similarity(target, c), *c))
        .filter(|(score, _)| *score >= 0.7)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c)
}

fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const GOOD_HEADER: &str =
        "ElementChr\tElementStart\tElementEnd\tElementName\tElementClass\tGeneSymbol\tGeneEnsemblID\tGeneTSS\tSampleSummaryShort\tScore";
    const GOOD_ROW: &str =
        "chr1\t100\t300\telem_a\tpromoter\tMYC\tENSG00000136997\t500\tK562 untreated\t0.9";

    fn check_rows(header: &str, rows: &[&str]) -> ValidationReport {
        let (mut checker, errors) = RowChecker::from_header(header);
        let mut report = ValidationReport {
            data_errors: errors,
            ..Default::default()
        };
        for (index, row) in rows.iter().enumerate() {
            checker.check_row(row, index + 2, &mut report);
        }
        report
    }

    fn row_with(column: usize, value: &str) -> String {
        let mut fields: Vec<&str> = GOOD_ROW.split('\t').collect();
        fields[column] = value;
        fields.join("\t")
    }

    // ── header analysis ───────────────────────────────────────────────

    #[rstest]
    fn test_clean_file_passes() {
        let report = check_rows(GOOD_HEADER, &[GOOD_ROW]);
        assert!(report.is_valid());
        assert!(report.data_warnings.is_empty());
    }

    #[rstest]
    fn test_missing_column_with_suggestion() {
        let header = GOOD_HEADER.replace("GeneEnsemblID", "GeneEnsembleID");
        let report = check_rows(&header, &[]);

        assert_eq!(report.data_errors.len(), 1);
        assert!(report.data_errors[0].contains("'GeneEnsemblID' was not found"));
        assert!(report.data_errors[0].contains("Closest matching column found: 'GeneEnsembleID'"));
    }

    #[rstest]
    fn test_missing_column_without_suggestion() {
        let header = GOOD_HEADER.replace("\tScore", "");
        let report = check_rows(&header, &[]);

        assert_eq!(report.data_errors.len(), 1);
        assert!(report.data_errors[0].contains("'Score' was not found."));
        assert!(!report.data_errors[0].contains("Closest matching"));
    }

    // ── per-column rules ──────────────────────────────────────────────

    #[rstest]
    #[case("chr23")]
    #[case("1")]
    #[case("chrZ")]
    fn test_bad_chromosome(#[case] chr: &str) {
        let report = check_rows(GOOD_HEADER, &[&row_with(0, chr)]);
        assert!(report.data_errors[0].contains("not in Gencode/UCSC notation"));
    }

    #[rstest]
    #[case("chr1")]
    #[case("chr22")]
    #[case("chrX")]
    #[case("chrM")]
    fn test_good_chromosome(#[case] chr: &str) {
        let report = check_rows(GOOD_HEADER, &[&row_with(0, chr)]);
        assert!(report.is_valid());
    }

    #[rstest]
    fn test_blank_coordinate() {
        let report = check_rows(GOOD_HEADER, &[&row_with(1, "")]);
        assert!(report.data_errors[0]
            .contains("'ElementStart' coordinate is required and cannot be blank"));
    }

    #[rstest]
    fn test_negative_coordinate() {
        let report = check_rows(GOOD_HEADER, &[&row_with(2, "-5")]);
        assert!(report.data_errors[0].contains("must be a nonnegative integer, but found '-5'"));
    }

    #[rstest]
    fn test_empty_gene_symbol() {
        let report = check_rows(GOOD_HEADER, &[&row_with(5, " ")]);
        assert!(report.data_errors[0].contains("Column 'GeneSymbol' cannot be blank or empty"));
    }

    #[rstest]
    fn test_element_class_warns_only() {
        let report = check_rows(GOOD_HEADER, &[&row_with(4, "enhancer")]);
        assert!(report.is_valid());
        assert!(report.data_warnings[0].contains("unrecognized value 'enhancer'"));
    }

    #[rstest]
    #[case("ENSG136997")]
    #[case("GENE1")]
    fn test_bad_ensembl_id(#[case] id: &str) {
        let report = check_rows(GOOD_HEADER, &[&row_with(6, id)]);
        assert!(report.data_errors[0].contains("not a valid Ensembl ID format"));
    }

    #[rstest]
    fn test_versioned_ensembl_id_accepted() {
        let report = check_rows(GOOD_HEADER, &[&row_with(6, "ENST00000384233.3")]);
        assert!(report.is_valid());
    }

    #[rstest]
    fn test_negative_tss_is_error_blank_is_warning() {
        let negative = check_rows(GOOD_HEADER, &[&row_with(7, "-10")]);
        assert!(negative.data_errors[0].contains("'GeneTSS' must be a nonnegative coordinate"));

        let blank = check_rows(GOOD_HEADER, &[&row_with(7, "")]);
        assert!(blank.is_valid());
        assert!(blank.data_warnings[0].contains("'GeneTSS' should not contain blank/NaN values"));
    }

    #[rstest]
    #[case("")]
    #[case("NaN")]
    #[case("high")]
    fn test_bad_score(#[case] score: &str) {
        let report = check_rows(GOOD_HEADER, &[&row_with(9, score)]);
        assert!(report.data_errors[0].contains("'Score' column cannot contain blank or NaN values"));
    }

    #[rstest]
    fn test_one_report_per_category() {
        let bad_row = row_with(0, "chr99");
        let report = check_rows(GOOD_HEADER, &[&bad_row, &bad_row, &bad_row]);
        assert_eq!(report.data_errors.len(), 1);
    }

    // ── closest match ─────────────────────────────────────────────────

    #[rstest]
    fn test_closest_match_cutoff() {
        assert_eq!(
            closest_match("GeneEnsemblID", &["GeneEnsembleID", "Score2"]),
            Some("GeneEnsembleID")
        );
        assert_eq!(closest_match("GeneEnsemblID", &["Unrelated"]), None);
    }

    #[rstest]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }
}
