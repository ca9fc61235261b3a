//! Function for running the command line program.

use super::{
    build, completions::run_completions_subcommand, compute::run_compute_subcommand,
    convert::run_convert_subcommand, inspect::run_inspect_subcommand,
    lookup::run_lookup_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `ucomp-density` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    match arguments.subcommand() {
        Some(("compute", compute_arguments)) => run_compute_subcommand(compute_arguments),
        Some(("convert", convert_arguments)) => run_convert_subcommand(convert_arguments),
        Some(("inspect", inspect_arguments)) => run_inspect_subcommand(inspect_arguments),
        Some(("lookup", lookup_arguments)) => run_lookup_subcommand(lookup_arguments),
        Some(("completions", completions_arguments)) => {
            run_completions_subcommand(completions_arguments)
        }
        _ => {}
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
