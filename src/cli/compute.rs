//! Command line interface for computing a line ratio table.

use super::utils;
use crate::{
    exit_on_error,
    grid::{fgr, GridConfig},
    io::{utils as io_utils, OverwriteMode, Verbosity},
    ratio::{RatioTable, RatioTableConfig, TemperatureMode},
    solver::{AtomicDatabase, IonSolverConfig},
};
use clap::{Arg, ArgMatches, Command};
use std::path::{Path, PathBuf};

/// Builds a representation of the `compute` command line subcommand.
pub fn create_compute_subcommand() -> Command<'static> {
    Command::new("compute")
        .about("Compute a Fe XIII 1074/1079 line ratio table")
        .long_about(
            "Compute a table of the Fe XIII 1074.7/1078.9 nm line ratio over heights and\n\
             electron densities with pycelp, and write it to a NetCDF file.\n\
             The CHIANTI database is located through the XUVTOP environment variable.",
        )
        .arg(
            Arg::new("output-file")
                .value_name("OUTPUT_FILE")
                .help(
                    "Path of the output file [default: \
                     chianti_v<VERSION>_pycelp_fe13_h<N_HEIGHTS>_d<N_DENSITIES>_[<NAME>_]ratio.nc]",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Name to add to the default output file name")
                .takes_value(true),
        )
        .arg(
            Arg::new("abundances-basename")
                .short('a')
                .long("abundances-basename")
                .value_name("BASENAME")
                .help("Basename of the CHIANTI abundance file, e.g. sun_coronal_2021_chianti")
                .takes_value(true),
        )
        .arg(
            Arg::new("chianti-maxtemp")
                .long("chianti-maxtemp")
                .help(
                    "Use the temperature of the SolarSoft CHIANTI MAX_TEMP routine (1778279 K)\n\
                     instead of the maximum temperature reported by pycelp (1676832 K)",
                ),
        )
        .arg(
            Arg::new("invert")
                .short('i')
                .long("invert")
                .help("Compute the 1079/1074 ratio instead of 1074/1079"),
        )
        .arg(
            Arg::new("no-limbdark")
                .long("no-limbdark")
                .help("Do not include limb darkening"),
        )
        .arg(
            Arg::new("no-protons")
                .long("no-protons")
                .help("Do not include proton collisions"),
        )
        .arg(
            Arg::new("n-levels")
                .long("n-levels")
                .value_name("NUMBER")
                .help("Number of atomic levels to include [default: all]")
                .takes_value(true),
        )
        .arg(
            Arg::new("n-heights")
                .long("n-heights")
                .value_name("NUMBER")
                .help("Number of heights")
                .takes_value(true)
                .default_value("240"),
        )
        .arg(
            Arg::new("min-height")
                .long("min-height")
                .value_name("HEIGHT")
                .help("Smallest height, measured from disk center [R_sun]")
                .takes_value(true)
                .default_value("1.005"),
        )
        .arg(
            Arg::new("max-height")
                .long("max-height")
                .value_name("HEIGHT")
                .help("Largest height, measured from disk center [R_sun]")
                .takes_value(true)
                .default_value("2.2"),
        )
        .arg(
            Arg::new("n-densities")
                .long("n-densities")
                .value_name("NUMBER")
                .help("Number of electron densities")
                .takes_value(true)
                .default_value("120"),
        )
        .arg(
            Arg::new("min-density")
                .long("min-density")
                .value_name("LOG_DENSITY")
                .allow_hyphen_values(true)
                .help("log₁₀ of the smallest electron density [cm⁻³]")
                .takes_value(true)
                .default_value("6.0"),
        )
        .arg(
            Arg::new("max-density")
                .long("max-density")
                .value_name("LOG_DENSITY")
                .allow_hyphen_values(true)
                .help("log₁₀ of the largest electron density [cm⁻³]")
                .takes_value(true)
                .default_value("12.0"),
        )
        .args(utils::create_overwrite_arguments())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print the height of each computed table row"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show a progress bar (overrides --verbose)"),
        )
}

/// Runs the actions for the `compute` subcommand using the given arguments.
pub fn run_compute_subcommand(arguments: &ArgMatches) {
    let database = exit_on_error!(
        AtomicDatabase::from_env(),
        "Error: Could not find CHIANTI database: {}\n\
         Tip: Set XUVTOP to the root directory of the CHIANTI database"
    );

    let config = ratio_table_config_from_arguments(arguments);
    exit_on_error!(config.grid.validate(), "Error: Invalid table grid: {}");

    let output_file_path = output_file_path_from_arguments(arguments, &database, &config);
    let overwrite_mode = utils::overwrite_mode_from_arguments(arguments);
    let verbosity = utils::parse_verbosity(arguments, true);

    ensure_solver_supported();
    ensure_table_writing_supported();
    if !exit_on_error!(
        io_utils::write_allowed(&output_file_path, overwrite_mode),
        "Error: Could not determine whether to overwrite existing file: {}"
    ) {
        println!("Not overwriting {}", output_file_path.display());
        return;
    }

    print_parameter_summary(&config);

    let table = compute_table(&database, &config, &verbosity);

    write_table(&table, &output_file_path, OverwriteMode::Always);
    println!("wrote {}", output_file_path.display());
}

/// Assembles the table configuration from the command line arguments.
pub fn ratio_table_config_from_arguments(arguments: &ArgMatches) -> RatioTableConfig {
    let grid = GridConfig {
        n_heights: utils::get_positive_count_from_required_argument(arguments, "n-heights"),
        height_limits: (
            utils::get_finite_float_value_from_required_parseable_argument::<fgr>(
                arguments,
                "min-height",
            ),
            utils::get_finite_float_value_from_required_parseable_argument::<fgr>(
                arguments,
                "max-height",
            ),
        ),
        n_densities: utils::get_positive_count_from_required_argument(arguments, "n-densities"),
        log_density_limits: (
            utils::get_finite_float_value_from_required_parseable_argument::<fgr>(
                arguments,
                "min-density",
            ),
            utils::get_finite_float_value_from_required_parseable_argument::<fgr>(
                arguments,
                "max-density",
            ),
        ),
    };

    RatioTableConfig {
        grid,
        temperature_mode: if arguments.is_present("chianti-maxtemp") {
            TemperatureMode::ChiantiMaximum
        } else {
            TemperatureMode::IonMaximum
        },
        invert: arguments.is_present("invert"),
        include_limb_darkening: !arguments.is_present("no-limbdark"),
        include_protons: !arguments.is_present("no-protons"),
        solver: IonSolverConfig {
            n_levels: utils::get_value_from_parseable_argument(arguments, "n-levels"),
            abundances_basename: arguments.value_of("abundances-basename").map(String::from),
        },
    }
}

fn output_file_path_from_arguments(
    arguments: &ArgMatches,
    database: &AtomicDatabase,
    config: &RatioTableConfig,
) -> PathBuf {
    utils::get_path_from_argument(arguments, "output-file").unwrap_or_else(|| {
        PathBuf::from(io_utils::default_output_file_name(
            database.version(),
            config.grid.n_heights,
            config.grid.n_densities,
            arguments.value_of("name"),
        ))
    })
}

fn print_parameter_summary(config: &RatioTableConfig) {
    let grid = &config.grid;
    println!(
        "abundances basename : {}",
        config
            .solver
            .abundances_basename
            .as_deref()
            .unwrap_or("None")
    );
    println!(
        "chianti_maxtemp     : {}",
        utils::yes_or_no(config.temperature_mode == TemperatureMode::ChiantiMaximum)
    );
    println!("invert              : {}", utils::yes_or_no(config.invert));
    println!(
        "limb darkening      : {}",
        utils::yes_or_no(config.include_limb_darkening)
    );
    println!(
        "protons             : {}",
        utils::yes_or_no(config.include_protons)
    );
    println!(
        "# of levels         : {}",
        config
            .solver
            .n_levels
            .map_or_else(|| "all".to_string(), |n_levels| n_levels.to_string())
    );
    println!("# of heights        : {}", grid.n_heights);
    println!(
        "height range        : {:0.3} - {:0.3} R_sun",
        grid.height_limits.0, grid.height_limits.1
    );
    println!("# of densities      : {}", grid.n_densities);
    println!(
        "density range       : 10**{:0.2} - 10**{:0.2}",
        grid.log_density_limits.0, grid.log_density_limits.1
    );
}

#[cfg(feature = "python")]
fn compute_table(
    database: &AtomicDatabase,
    config: &RatioTableConfig,
    verbosity: &Verbosity,
) -> RatioTable {
    let mut solver = exit_on_error!(
        crate::solver::pycelp::PycelpIon::new(database, crate::constants::ION_NAME, &config.solver),
        "Error: Could not create pycelp ion model: {}"
    );

    let start_instant = std::time::Instant::now();
    let table = exit_on_error!(
        crate::ratio::compute_ratio_table(&mut solver, database.version(), config, verbosity),
        "Error: Could not compute ratio table: {}"
    );
    println!(
        "computation time: {:0.1} secs",
        start_instant.elapsed().as_secs_f64()
    );
    table
}

#[cfg(not(feature = "python"))]
fn compute_table(
    _database: &AtomicDatabase,
    _config: &RatioTableConfig,
    _verbosity: &Verbosity,
) -> RatioTable {
    crate::exit_with_error!("{}", MISSING_SOLVER_MESSAGE)
}

#[cfg(not(feature = "python"))]
const MISSING_SOLVER_MESSAGE: &str =
    "Error: Compile with python feature in order to compute line intensities with pycelp\n\
     Tip: Use cargo flag --features=python and make sure pycelp is installed";

fn ensure_solver_supported() {
    #[cfg(not(feature = "python"))]
    crate::exit_with_error!("{}", MISSING_SOLVER_MESSAGE);
}

fn ensure_table_writing_supported() {
    #[cfg(not(feature = "netcdf"))]
    crate::exit_with_error!(
        "Error: Compile with netcdf feature in order to write ratio tables\n\
         Tip: Use cargo flag --features=netcdf and make sure the NetCDF library is available"
    );
}

/// Writes the table to a NetCDF file if permitted by the overwrite mode.
pub fn write_table<P: AsRef<Path>>(table: &RatioTable, output_file_path: P, mode: OverwriteMode) {
    let output_file_path = output_file_path.as_ref();
    if !exit_on_error!(
        io_utils::write_allowed(output_file_path, mode),
        "Error: Could not determine whether to overwrite existing file: {}"
    ) {
        println!("Not overwriting {}", output_file_path.display());
        return;
    }

    #[cfg(feature = "netcdf")]
    exit_on_error!(
        crate::io::netcdf::write_ratio_table(
            table,
            output_file_path,
            crate::io::netcdf::STANDARD_DIMENSION_NAMES
        ),
        "Error: Could not write ratio table: {}"
    );

    #[cfg(not(feature = "netcdf"))]
    {
        let _ = table;
        ensure_table_writing_supported();
    }
}
