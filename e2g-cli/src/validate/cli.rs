use clap::{arg, Arg, Command};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Check an E2G prediction file against the standard-format rules.")
        .arg(Arg::new("file").help("Path to the prediction file to validate (tsv.gz)"))
        .arg(
            arg!(--all)
                .help("Scan every data row instead of stopping at the first findings")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--json)
                .help("Emit the report as JSON instead of human-readable feedback")
                .action(clap::ArgAction::SetTrue),
        )
}
