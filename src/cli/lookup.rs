//! Command line interface for inferring electron densities from line ratios.

use super::{inspect::read_table, utils};
use crate::{exit_on_none, grid::fgr, ratio::frt};
use clap::{Arg, ArgMatches, Command};
use std::path::Path;

/// Creates a subcommand for looking up the density for an observed ratio.
pub fn create_lookup_subcommand() -> Command<'static> {
    Command::new("lookup")
        .about("Infer the electron density for an observed line ratio")
        .arg(
            Arg::new("input-file")
                .value_name("INPUT_FILE")
                .help("Path of the NetCDF ratio table file")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("HEIGHT")
                .help("Height of the observation, measured from disk center [R_sun]")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("ratio")
                .long("ratio")
                .value_name("RATIO")
                .help("Observed line ratio, in the same sense as the table")
                .required(true)
                .takes_value(true),
        )
}

/// Runs the actions for the `lookup` subcommand using the given arguments.
pub fn run_lookup_subcommand(arguments: &ArgMatches) {
    let input_file_path = Path::new(
        arguments
            .value_of("input-file")
            .expect("No value for required argument"),
    );
    let height: fgr =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "height");
    let ratio: frt =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "ratio");

    let table = read_table(input_file_path);

    let density = exit_on_none!(
        table.infer_density(height, ratio),
        "Error: Ratio {} at height {} R_sun is not covered by the table",
        ratio,
        height
    );
    println!("{:e}", density);
}
