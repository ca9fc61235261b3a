//! Function for building the command line hierarchy.

use super::{
    completions::create_completions_subcommand, compute::create_compute_subcommand,
    convert::create_convert_subcommand, inspect::create_inspect_subcommand,
    lookup::create_lookup_subcommand,
};
use clap::{self, Arg, Command};

/// Builds the `ucomp-density` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
        .subcommand(create_compute_subcommand())
        .subcommand(create_convert_subcommand())
        .subcommand(create_inspect_subcommand())
        .subcommand(create_lookup_subcommand())
        .subcommand(create_completions_subcommand())
}
