use clap::{arg, Arg, Command};

pub const GENE_SCORE_CMD: &str = "gene-score";
pub const DEFAULT_KEY_COLUMN: &str = "GeneSymbol";

pub fn create_gene_score_cli() -> Command {
    Command::new(GENE_SCORE_CMD)
        .about("Append a per-gene score (pLI, s_het, ...) to an E2G pair table.")
        .arg(Arg::new("pairs").help("Path to the E2G pair table (tsv or tsv.gz)"))
        .arg(
            arg!(--scores <scores>)
                .required(true)
                .help("Path to the gene-level score table"),
        )
        .arg(
            Arg::new("score-column")
                .long("score-column")
                .required(true)
                .help("Header name of the numeric score column in the score table"),
        )
        .arg(
            Arg::new("gene-column")
                .long("gene-column")
                .required(true)
                .help("Header name of the gene identifier column in the score table"),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .help("Pair-table column to join on: GeneSymbol (default) or GeneEnsemblID"),
        )
        .arg(
            Arg::new("column-name")
                .long("column-name")
                .help("Name of the appended column (default: the score column's name)"),
        )
        .arg(arg!(--output <output>).required(true).help("Output path"))
}
