use clap::{arg, Arg, Command};

pub const PINLOOP_CMD: &str = "pinloop";
pub const OUTPUT_SUFFIX: &str = "_pinloop.tsv.gz";

pub fn create_pinloop_cli() -> Command {
    Command::new(PINLOOP_CMD)
        .about("Annotate an E2G pair table with chromatin-loop contact probabilities.")
        .arg(Arg::new("pairs").help("Path to the E2G pair table (tsv or tsv.gz)"))
        .arg(
            arg!(--loops <loops>)
                .required(true)
                .help("Path to the chromatin-loop catalog (ChIA-PET style tsv)"),
        )
        .arg(arg!(--output <output>).help("Output path (default: <pairs stem>_pinloop.tsv.gz)"))
}
