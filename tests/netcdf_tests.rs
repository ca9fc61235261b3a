#![cfg(feature = "netcdf")]

mod common;

use common::{three_by_three_config, SmoothSolver};
use netcdf_rs::AttrValue;
use ucomp_density::{
    grid::HeightDensityGrid,
    io::{
        netcdf::{read_ratio_table, write_ratio_table, LEGACY_DIMENSION_NAMES, STANDARD_DIMENSION_NAMES},
        Verbosity,
    },
    ratio::{compute_ratio_table, RatioTable},
    solver::IonSolverConfig,
};

fn as_stored(value: f64) -> f64 {
    f64::from(value as f32)
}

#[test]
fn table_with_unset_options_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.nc");

    let table = compute_ratio_table(
        &mut SmoothSolver::new(),
        "10.0.1",
        &three_by_three_config(false),
        &Verbosity::Quiet,
    )
    .unwrap();
    write_ratio_table(&table, &path, STANDARD_DIMENSION_NAMES).unwrap();
    let read_table = read_ratio_table(&path).unwrap();

    for (&read, &original) in read_table.heights().iter().zip(table.heights()) {
        assert_eq!(read, as_stored(original));
    }
    for (&read, &original) in read_table.densities().iter().zip(table.densities()) {
        assert_eq!(read, as_stored(original));
    }
    for (&read, &original) in read_table.ratios().iter().zip(table.ratios()) {
        assert_eq!(read, as_stored(original));
    }

    let metadata = read_table.metadata().unwrap();
    assert_eq!(metadata, table.metadata().unwrap());
    assert_eq!(metadata.abundances_basename, None);
    assert_eq!(metadata.n_levels, None);
}

#[test]
fn table_with_all_options_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("table.nc");

    let mut config = three_by_three_config(true);
    config.include_limb_darkening = false;
    config.include_protons = false;
    config.solver = IonSolverConfig {
        n_levels: Some(100),
        abundances_basename: Some("sun_coronal_2021_chianti".to_string()),
    };
    let table =
        compute_ratio_table(&mut SmoothSolver::new(), "10.0.1", &config, &Verbosity::Quiet).unwrap();
    write_ratio_table(&table, &path, STANDARD_DIMENSION_NAMES).unwrap();

    let metadata = read_ratio_table(&path).unwrap().metadata().cloned().unwrap();
    assert_eq!(
        metadata.abundances_basename.as_deref(),
        Some("sun_coronal_2021_chianti.abund")
    );
    assert_eq!(metadata.n_levels, Some(100));
    assert!(metadata.invert);
    assert!(!metadata.limb_darkening);
    assert!(!metadata.protons);
}

#[test]
fn legacy_table_is_written_without_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.nc");

    let grid = HeightDensityGrid::from_axes(vec![1.05, 1.1], vec![1e7, 1e8, 1e9]).unwrap();
    let ratios = ndarray::array![[0.25, 0.5, 0.75], [0.125, 0.375, 0.625]];
    let table = RatioTable::new(grid, ratios.clone(), None).unwrap();
    write_ratio_table(&table, &path, LEGACY_DIMENSION_NAMES).unwrap();

    let read_table = read_ratio_table(&path).unwrap();
    assert!(read_table.metadata().is_none());
    assert_eq!(read_table.ratios(), &ratios);
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.nc");
    std::fs::write(&path, b"not a table").unwrap();

    let table = compute_ratio_table(
        &mut SmoothSolver::new(),
        "10.0.1",
        &three_by_three_config(false),
        &Verbosity::Quiet,
    )
    .unwrap();
    write_ratio_table(&table, &path, STANDARD_DIMENSION_NAMES).unwrap();
    assert!(read_ratio_table(&path).is_ok());

    let leftovers = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .ends_with(".tmp")
        })
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn missing_file_is_reported() {
    assert!(read_ratio_table("/nonexistent/table.nc").is_err());
}

/// netCDF type code of 32-bit floats.
const NC_FLOAT: i32 = 5;

#[test]
fn stored_file_follows_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.nc");

    let mut config = three_by_three_config(false);
    config.grid.n_densities = 4;
    let table =
        compute_ratio_table(&mut SmoothSolver::new(), "10.0.1", &config, &Verbosity::Quiet).unwrap();
    write_ratio_table(&table, &path, STANDARD_DIMENSION_NAMES).unwrap();

    let file = netcdf_rs::open(&path).unwrap();
    assert_eq!(file.dimension("n_heights").unwrap().len(), 3);
    assert_eq!(file.dimension("n_densities").unwrap().len(), 4);

    for (name, dimension_names) in [
        ("h", vec!["n_heights"]),
        ("den", vec!["n_densities"]),
        ("rat", vec!["n_heights", "n_densities"]),
    ] {
        let var = file.variable(name).unwrap();
        assert_eq!(var.vartype(), NC_FLOAT, "{} is not float32", name);
        let names: Vec<String> = var.dimensions().iter().map(|dim| dim.name()).collect();
        assert_eq!(names, dimension_names);
    }

    let attribute = |name: &str| file.attribute(name).unwrap().value().unwrap();
    assert!(matches!(attribute("chianti_version"), AttrValue::Str(ref version) if version == "10.0.1"));
    assert!(matches!(attribute("electron_temperature"), AttrValue::Double(temperature) if temperature == 1676832.0));
    assert!(matches!(attribute("abundances_basename"), AttrValue::Str(ref basename) if basename.is_empty()));
    assert!(matches!(attribute("n_levels"), AttrValue::Double(n_levels) if n_levels.is_nan()));
    assert!(matches!(attribute("invert"), AttrValue::Uchar(0)));
    assert!(matches!(attribute("limbdark"), AttrValue::Uchar(1)));
    assert!(matches!(attribute("protons"), AttrValue::Uchar(1)));
}

#[test]
fn legacy_layout_has_no_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.nc");

    let grid = HeightDensityGrid::from_axes(vec![1.05, 1.1], vec![1e7, 1e8, 1e9]).unwrap();
    let table = RatioTable::new(grid, ndarray::Array2::ones((2, 3)), None).unwrap();
    write_ratio_table(&table, &path, LEGACY_DIMENSION_NAMES).unwrap();

    let file = netcdf_rs::open(&path).unwrap();
    assert_eq!(file.dimension("h").unwrap().len(), 2);
    assert_eq!(file.dimension("den").unwrap().len(), 3);
    assert!(file.dimension("n_heights").is_none());
    assert_eq!(file.attributes().count(), 0);
}
