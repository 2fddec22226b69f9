mod annotate;
mod pinloop;
mod validate;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "e2g";
    pub const BIN_NAME: &str = "e2g";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Tools for annotating candidate element-to-gene pairs with genomic features derived from external genomic tracks.")
        .subcommand_required(true)
        .subcommand(pinloop::cli::create_pinloop_cli())
        .subcommand(validate::cli::create_validate_cli())
        .subcommand(annotate::cli::create_gene_score_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // PINLOOP
        //
        Some((pinloop::cli::PINLOOP_CMD, matches)) => {
            pinloop::handlers::run_pinloop(matches)?;
        }

        //
        // VALIDATE
        //
        Some((validate::cli::VALIDATE_CMD, matches)) => {
            validate::handlers::run_validate(matches)?;
        }

        //
        // GENE SCORE
        //
        Some((annotate::cli::GENE_SCORE_CMD, matches)) => {
            annotate::handlers::run_gene_score(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
