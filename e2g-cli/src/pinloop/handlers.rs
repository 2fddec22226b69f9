use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};

use e2g_core::models::PairTable;
use e2g_core::utils::remove_all_extensions;
use e2g_io::TableWrite;
use e2g_pinloop::scoring::annotate_pair_table;
use e2g_pinloop::LoopCatalog;

use super::cli::OUTPUT_SUFFIX;

pub fn run_pinloop(matches: &ArgMatches) -> Result<()> {
    let pairs = matches
        .get_one::<String>("pairs")
        .expect("A path to a pair table is required.");

    let loops = matches
        .get_one::<String>("loops")
        .expect("A path to a loop catalog is required.");

    let pairs_path = Path::new(pairs);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );

    spinner.set_message("Reading loop catalog...");
    let catalog = LoopCatalog::try_from(Path::new(loops.as_str()))
        .with_context(|| format!("Failed to load loop catalog: {}", loops))?;

    spinner.set_message("Reading pair table...");
    let mut table = PairTable::try_from(pairs_path)
        .with_context(|| format!("Failed to load pair table: {}", pairs))?;

    spinner.set_message(format!(
        "Scoring {} pairs against {} loops...",
        table.len(),
        catalog.len()
    ));
    annotate_pair_table(&mut table, &catalog)?;

    let output = match matches.get_one::<String>("output") {
        Some(output) => PathBuf::from(output),
        None => default_output_path(pairs_path),
    };

    table
        .write_auto(&output)
        .with_context(|| format!("Failed to write output file: {:?}", output))?;

    spinner.finish_with_message(format!("Wrote {}", output.display()));

    Ok(())
}

fn default_output_path(pairs: &Path) -> PathBuf {
    let stem = remove_all_extensions(pairs);
    pairs.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/pairs.tsv.gz")),
            PathBuf::from("/data/pairs_pinloop.tsv.gz")
        );
        assert_eq!(
            default_output_path(Path::new("pairs.tsv")),
            PathBuf::from("pairs_pinloop.tsv.gz")
        );
    }
}
