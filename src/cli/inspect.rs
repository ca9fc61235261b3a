//! Command line interface for printing information about a ratio table file.

use crate::ratio::RatioTable;
use clap::{Arg, ArgMatches, Command};
use std::path::Path;

/// Creates a subcommand for inspecting a ratio table file.
pub fn create_inspect_subcommand() -> Command<'static> {
    Command::new("inspect")
        .about("Print the axes and provenance of a ratio table file")
        .arg(
            Arg::new("input-file")
                .value_name("INPUT_FILE")
                .help("Path of the NetCDF ratio table file")
                .required(true)
                .takes_value(true),
        )
}

/// Runs the actions for the `inspect` subcommand using the given arguments.
pub fn run_inspect_subcommand(arguments: &ArgMatches) {
    let input_file_path = Path::new(
        arguments
            .value_of("input-file")
            .expect("No value for required argument"),
    );
    let table = read_table(input_file_path);
    print!("{}", describe_table(&table));
}

/// Reads the ratio table file at the given path, exiting on failure.
pub fn read_table(input_file_path: &Path) -> RatioTable {
    #[cfg(feature = "netcdf")]
    {
        crate::exit_on_error!(
            crate::io::netcdf::read_ratio_table(input_file_path),
            "Error: Could not read {0}: {1}",
            input_file_path.display()
        )
    }
    #[cfg(not(feature = "netcdf"))]
    {
        let _ = input_file_path;
        crate::exit_with_error!(
            "Error: Compile with netcdf feature in order to read ratio tables\n\
             Tip: Use cargo flag --features=netcdf and make sure the NetCDF library is available"
        )
    }
}

/// Returns a human readable summary of the given table.
pub fn describe_table(table: &RatioTable) -> String {
    let heights = table.heights();
    let densities = table.densities();
    let finite_ratios = table.ratios().iter().filter(|ratio| ratio.is_finite());
    let (min_ratio, max_ratio) = finite_ratios.fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &ratio| (min.min(ratio), max.max(ratio)),
    );

    let mut text = format!(
        "# of heights        : {}\n\
         height range        : {:0.3} - {:0.3} R_sun\n\
         # of densities      : {}\n\
         density range       : {:e} - {:e} cm^-3\n\
         ratio range         : {:0.4} - {:0.4}\n",
        heights.len(),
        heights[0],
        heights[heights.len() - 1],
        densities.len(),
        densities[0],
        densities[densities.len() - 1],
        min_ratio,
        max_ratio
    );

    match table.metadata() {
        Some(metadata) => {
            text.push_str(&format!(
                "chianti version     : {}\n\
                 temperature         : {} K\n\
                 abundances          : {}\n\
                 # of levels         : {}\n\
                 invert              : {}\n\
                 limb darkening      : {}\n\
                 protons             : {}\n",
                metadata.chianti_version,
                metadata.electron_temperature,
                metadata.abundances_basename.as_deref().unwrap_or("default"),
                metadata
                    .n_levels
                    .map_or_else(|| "all".to_string(), |n_levels| n_levels.to_string()),
                super::utils::yes_or_no(metadata.invert),
                super::utils::yes_or_no(metadata.limb_darkening),
                super::utils::yes_or_no(metadata.protons),
            ));
        }
        None => text.push_str("no provenance metadata\n"),
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::HeightDensityGrid, ratio::ProvenanceMetadata};
    use ndarray::array;

    #[test]
    fn description_lists_provenance() {
        let grid = HeightDensityGrid::from_axes(vec![1.1, 1.2], vec![1e8, 1e9]).unwrap();
        let metadata = ProvenanceMetadata {
            chianti_version: "10.0.1".to_string(),
            electron_temperature: 1778279.0,
            abundances_basename: None,
            n_levels: None,
            invert: false,
            limb_darkening: true,
            protons: false,
        };
        let table =
            RatioTable::new(grid, array![[0.5, 0.25], [f64::NAN, 1.0]], Some(metadata)).unwrap();
        let text = describe_table(&table);
        assert!(text.contains("ratio range         : 0.2500 - 1.0000"));
        assert!(text.contains("chianti version     : 10.0.1"));
        assert!(text.contains("# of levels         : all"));
        assert!(text.contains("protons             : NO"));
    }
}
