//! Command line interface for converting `.npz` ratio tables to NetCDF.

use super::utils;
use crate::io::OverwriteMode;
use clap::{Arg, ArgMatches, Command};
use std::path::Path;

/// Creates a subcommand for converting legacy ratio table archives.
pub fn create_convert_subcommand() -> Command<'static> {
    Command::new("convert")
        .about("Convert .npz ratio tables to NetCDF")
        .long_about(
            "Convert ratio tables stored as .npz archives (arrays h, den and rat) to\n\
             NetCDF files with the same name but a .nc extension.",
        )
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .help(".npz files to convert")
                .required(true)
                .multiple_values(true)
                .takes_value(true),
        )
        .args(utils::create_overwrite_arguments())
}

/// Runs the actions for the `convert` subcommand using the given arguments.
pub fn run_convert_subcommand(arguments: &ArgMatches) {
    let overwrite_mode = utils::overwrite_mode_from_arguments(arguments);
    for input_file_path in arguments
        .values_of("files")
        .expect("No values for required argument")
    {
        convert_file(Path::new(input_file_path), overwrite_mode);
    }
}

#[cfg(all(feature = "npz", feature = "netcdf"))]
fn convert_file(input_file_path: &Path, overwrite_mode: OverwriteMode) {
    use crate::{
        exit_on_error,
        io::{netcdf, npz, utils as io_utils},
    };

    let output_file_path = input_file_path.with_extension("nc");

    println!("reading {}...", input_file_path.display());
    let table = exit_on_error!(
        npz::read_legacy_ratio_table(input_file_path),
        "Error: Could not read {0}: {1}",
        input_file_path.display()
    );

    if !exit_on_error!(
        io_utils::write_allowed(&output_file_path, overwrite_mode),
        "Error: Could not determine whether to overwrite existing file: {}"
    ) {
        println!("Not overwriting {}", output_file_path.display());
        return;
    }

    println!("writing {}...", output_file_path.display());
    exit_on_error!(
        netcdf::write_ratio_table(&table, &output_file_path, netcdf::LEGACY_DIMENSION_NAMES),
        "Error: Could not write {0}: {1}",
        output_file_path.display()
    );
}

#[cfg(not(all(feature = "npz", feature = "netcdf")))]
fn convert_file(_input_file_path: &Path, _overwrite_mode: OverwriteMode) {
    crate::exit_with_error!(
        "Error: Compile with npz and netcdf features in order to convert .npz files\n\
         Tip: Use cargo flag --features=npz,netcdf and make sure the NetCDF library is available"
    );
}
