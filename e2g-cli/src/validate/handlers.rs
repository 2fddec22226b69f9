use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use e2g_validate::validate_file;

pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .expect("A path to a prediction file is required.");

    let check_all_rows = matches.get_flag("all");
    let as_json = matches.get_flag("json");

    let path = Path::new(file);
    if !as_json {
        println!("Checking formatting of {}...", path.display());
    }

    let report = validate_file(path, check_all_rows)
        .with_context(|| format!("Failed to validate file: {}", file))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.clone());
        println!("{}", report.render(&file_name));
    }

    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}
