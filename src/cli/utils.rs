//! Utilities for creating the command line interface.

use crate::{
    exit_on_error, exit_on_false,
    io::{OverwriteMode, Verbosity},
    num::BFloat,
};
use clap::{Arg, ArgMatches};
use indicatif::ProgressStyle;
use lazy_static::lazy_static;
use std::{path::PathBuf, str::FromStr};

lazy_static! {
    static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_value_from_parseable_argument<T>(arguments: &ArgMatches, argument_name: &str) -> Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    arguments
        .value_of(argument_name)
        .map(|value_string| parse_value_string(argument_name, value_string))
}

pub fn get_finite_float_value_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let value: F = get_value_from_required_parseable_argument(arguments, argument_name);
    exit_on_false!(value.is_finite(), "Error: {} must be finite", argument_name);
    value
}

pub fn get_positive_count_from_required_argument(
    arguments: &ArgMatches,
    argument_name: &str,
) -> usize {
    let count: usize = get_value_from_required_parseable_argument(arguments, argument_name);
    exit_on_false!(count > 0, "Error: {} must be at least 1", argument_name);
    count
}

pub fn get_path_from_argument(arguments: &ArgMatches, argument_name: &str) -> Option<PathBuf> {
    arguments.value_of(argument_name).map(PathBuf::from)
}

/// Creates the `--overwrite` and `--no-overwrite` arguments.
pub fn create_overwrite_arguments() -> [Arg<'static>; 2] {
    [
        Arg::new("overwrite")
            .long("overwrite")
            .help("Automatically overwrite any existing files"),
        Arg::new("no-overwrite")
            .long("no-overwrite")
            .help("Do not overwrite any existing files")
            .conflicts_with("overwrite"),
    ]
}

pub fn overwrite_mode_from_arguments(arguments: &ArgMatches) -> OverwriteMode {
    if arguments.is_present("overwrite") {
        OverwriteMode::Always
    } else if arguments.is_present("no-overwrite") {
        OverwriteMode::Never
    } else {
        OverwriteMode::Ask
    }
}

pub fn parse_verbosity(arguments: &ArgMatches, support_progress: bool) -> Verbosity {
    if support_progress && arguments.is_present("progress") {
        Verbosity::Progress(DEFAULT_PROGRESS_STYLE.clone())
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}

/// Formats a flag as `YES` or `NO` for parameter summaries.
pub fn yes_or_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}
