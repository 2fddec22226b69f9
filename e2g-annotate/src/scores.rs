use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use e2g_core::models::PairTable;
use e2g_core::utils::get_dynamic_reader;

/// Which pair-table column the score table joins on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKey {
    GeneSymbol,
    GeneEnsemblId,
}

impl FromStr for ScoreKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GeneSymbol" => Ok(ScoreKey::GeneSymbol),
            "GeneEnsemblID" => Ok(ScoreKey::GeneEnsemblId),
            _ => Err(format!(
                "Invalid score key: {} (expected GeneSymbol or GeneEnsemblID)",
                s
            )),
        }
    }
}

/// A per-gene score table loaded from a delimited file: one key column, one
/// numeric score column, everything else ignored.
#[derive(Debug)]
pub struct GeneScoreTable {
    scores: HashMap<String, f64>,
    mean: f64,
}

impl GeneScoreTable {
    ///
    /// Load scores from a tsv or tsv.gz file.
    ///
    /// # Arguments:
    /// - path: path to the score file on disk
    /// - key_column: header name of the gene identifier column
    /// - score_column: header name of the numeric score column
    ///
    /// Rows whose score field is blank or `NA` count as missing and do not
    /// enter the mean. Duplicate keys keep their first score.
    pub fn from_file(path: &Path, key_column: &str, score_column: &str) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;

        let mut columns: Option<(usize, usize)> = None;
        let mut scores: HashMap<String, f64> = HashMap::new();
        let mut sum = 0.0;
        let mut n = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line =
                line.with_context(|| format!("There was an error reading line {}", index + 1))?;

            let fields: Vec<&str> = line.split('\t').collect();

            let Some((key_index, score_index)) = columns else {
                let find = |column: &str| {
                    fields.iter().position(|f| *f == column).with_context(|| {
                        format!("Column '{}' not found in header of {:?}", column, path)
                    })
                };
                columns = Some((find(key_column)?, find(score_column)?));
                continue;
            };

            let key = fields.get(key_index).copied().unwrap_or("").trim();
            let raw = fields.get(score_index).copied().unwrap_or("").trim();
            if key.is_empty() || raw.is_empty() || matches!(raw, "NA" | "NaN" | "nan") {
                continue;
            }

            let score: f64 = raw.parse().with_context(|| {
                format!(
                    "Error parsing score '{}' for '{}' on line {}",
                    raw,
                    key,
                    index + 1
                )
            })?;

            if !scores.contains_key(key) {
                scores.insert(key.to_string(), score);
                sum += score;
                n += 1;
            }
        }

        columns.with_context(|| format!("Score file is empty: {:?}", path))?;
        if n == 0 {
            anyhow::bail!("No usable scores found in {:?}", path);
        }

        Ok(GeneScoreTable {
            scores,
            mean: sum / n as f64,
        })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.scores.get(key).copied()
    }

    /// Mean score across the score table, used to impute missing genes.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

///
/// Append one gene-score column to the pair table.
///
/// Every row is annotated: genes found in the score table get their score,
/// the rest get the mean score across the score table.
///
pub fn annotate_gene_scores(
    table: &mut PairTable,
    scores: &GeneScoreTable,
    key: ScoreKey,
    column_name: &str,
) -> Result<()> {
    let mut values: Vec<String> = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let gene = match key {
            ScoreKey::GeneSymbol => table.gene_symbol(row),
            ScoreKey::GeneEnsemblId => table.gene_ensembl_id(row),
        };
        let score = scores.get(gene).unwrap_or_else(|| scores.mean());
        values.push(score.to_string());
    }

    table.append_column(column_name, values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    fn write_tsv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn pair_table() -> PairTable {
        let file = write_tsv(&[
            "ElementChr\tElementStart\tElementEnd\tElementName\tGeneEnsemblID\tGeneSymbol\tGeneTSS",
            "chr1\t100\t300\telem_a\tENSG01\tMYC\t500",
            "chr1\t550\t650\telem_b\tENSG02\tTP53\t700",
            "chr2\t10\t20\telem_c\tENSG03\tNOVEL1\t40",
        ]);
        PairTable::try_from(file.path()).unwrap()
    }

    #[fixture]
    fn score_file() -> tempfile::NamedTempFile {
        write_tsv(&[
            "gene\ttranscript_count\tpLI",
            "MYC\t4\t1.0",
            "TP53\t12\t2.0",
            "BRCA1\t9\t6.0",
        ])
    }

    #[rstest]
    fn test_load_score_table(score_file: tempfile::NamedTempFile) {
        let scores = GeneScoreTable::from_file(score_file.path(), "gene", "pLI").unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores.get("MYC"), Some(1.0));
        assert_eq!(scores.get("NOVEL1"), None);
        assert_eq!(scores.mean(), 3.0);
    }

    #[rstest]
    fn test_na_scores_excluded_from_mean() {
        let file = write_tsv(&[
            "gene\tpLI",
            "MYC\t1.0",
            "TP53\tNA",
            "BRCA1\t5.0",
        ]);
        let scores = GeneScoreTable::from_file(file.path(), "gene", "pLI").unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get("TP53"), None);
        assert_eq!(scores.mean(), 3.0);
    }

    #[rstest]
    fn test_missing_column_rejected(score_file: tempfile::NamedTempFile) {
        let err = GeneScoreTable::from_file(score_file.path(), "gene", "shet").unwrap_err();
        assert!(err.to_string().contains("'shet' not found"));
    }

    #[rstest]
    fn test_unparseable_score_rejected() {
        let file = write_tsv(&["gene\tpLI", "MYC\thigh"]);
        let err = GeneScoreTable::from_file(file.path(), "gene", "pLI").unwrap_err();
        assert!(err.to_string().contains("Error parsing score 'high'"));
    }

    #[rstest]
    fn test_annotate_with_mean_imputation(score_file: tempfile::NamedTempFile) {
        let scores = GeneScoreTable::from_file(score_file.path(), "gene", "pLI").unwrap();
        let mut table = pair_table();

        annotate_gene_scores(&mut table, &scores, ScoreKey::GeneSymbol, "pLI").unwrap();

        assert_eq!(table.header.last().unwrap(), "pLI");
        assert_eq!(table.rows[0].last().unwrap(), "1");
        assert_eq!(table.rows[1].last().unwrap(), "2");
        // NOVEL1 is absent from the score table: imputed with the mean
        assert_eq!(table.rows[2].last().unwrap(), "3");
    }

    #[rstest]
    fn test_score_key_from_str() {
        assert_eq!(ScoreKey::from_str("GeneSymbol"), Ok(ScoreKey::GeneSymbol));
        assert_eq!(
            ScoreKey::from_str("GeneEnsemblID"),
            Ok(ScoreKey::GeneEnsemblId)
        );
        assert!(ScoreKey::from_str("gene").is_err());
    }
}
