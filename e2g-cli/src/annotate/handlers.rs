use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use e2g_annotate::{annotate_gene_scores, GeneScoreTable, ScoreKey};
use e2g_core::models::PairTable;
use e2g_io::TableWrite;

use super::cli::DEFAULT_KEY_COLUMN;

pub fn run_gene_score(matches: &ArgMatches) -> Result<()> {
    let pairs = matches
        .get_one::<String>("pairs")
        .expect("A path to a pair table is required.");

    let scores = matches
        .get_one::<String>("scores")
        .expect("A path to a score table is required.");

    let score_column = matches
        .get_one::<String>("score-column")
        .expect("A score column name is required.");

    let gene_column = matches
        .get_one::<String>("gene-column")
        .expect("A gene column name is required.");

    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");

    let default_key = DEFAULT_KEY_COLUMN.to_string();
    let key = matches.get_one::<String>("key").unwrap_or(&default_key);
    let key = match ScoreKey::from_str(key) {
        Ok(key) => key,
        Err(_) => anyhow::bail!("Unknown join key supplied: {}", key),
    };

    let column_name = matches
        .get_one::<String>("column-name")
        .unwrap_or(score_column);

    let mut table = PairTable::try_from(Path::new(pairs.as_str()))
        .with_context(|| format!("Failed to load pair table: {}", pairs))?;

    let score_table = GeneScoreTable::from_file(Path::new(scores.as_str()), gene_column, score_column)
        .with_context(|| format!("Failed to load score table: {}", scores))?;

    annotate_gene_scores(&mut table, &score_table, key, column_name)?;

    table
        .write_auto(Path::new(output.as_str()))
        .with_context(|| format!("Failed to write output file: {}", output))?;

    eprintln!(
        "Annotated {} pairs with '{}' ({} genes in score table, mean {:.4} imputed for the rest)",
        table.len(),
        column_name,
        score_table.len(),
        score_table.mean()
    );

    Ok(())
}
