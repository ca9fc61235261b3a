//! Command line interface for generating a command line completion script.

use super::build;
use clap::{Arg, ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

/// Creates a subcommand for printing a shell completion script.
pub fn create_completions_subcommand() -> Command<'static> {
    Command::new("completions")
        .about("Generate tab-completion script for your shell")
        .hide(true)
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .required(true)
                .possible_values(["bash", "zsh", "fish"])
                .help("The shell to generate the script for"),
        )
        .after_help(
            "The script is written to standard output. For Bash, for instance:\n\n    \
             $ ucomp-density completions bash > ~/.local/share/bash-completion/completions/ucomp-density",
        )
}

/// Runs the actions for the `completions` subcommand using the given arguments.
pub fn run_completions_subcommand(arguments: &ArgMatches) {
    let shell: Shell = super::utils::get_value_from_required_parseable_argument(arguments, "shell");
    let mut command = build::build();
    generate(shell, &mut command, clap::crate_name!(), &mut io::stdout());
}
