//! Reading and writing of ratio tables in NetCDF format.
//!
//! A table file holds the float32 variables `h(n_heights)`, `den(n_densities)`
//! and `rat(n_heights, n_densities)`. Provenance is stored as file-level
//! attributes: an unset abundance file is written as an empty string and an
//! unset number of levels as NaN, since existing readers rely on these values.

use super::utils::AtomicOutputPath;
use crate::{
    constants::fcn,
    grid::{fgr, HeightDensityGrid},
    io_result,
    ratio::{frt, ProvenanceMetadata, RatioTable},
};
use ndarray::Array2;
use netcdf_rs::{self as nc, AttrValue, File, MutableFile};
use std::{io, path::Path};

/// Floating-point precision of the values stored in table files.
#[allow(non_camel_case_types)]
pub type fnc = f32;

pub const HEIGHT_VARIABLE_NAME: &str = "h";
pub const DENSITY_VARIABLE_NAME: &str = "den";
pub const RATIO_VARIABLE_NAME: &str = "rat";

/// Dimension names used for tables with provenance.
pub const STANDARD_DIMENSION_NAMES: [&str; 2] = ["n_heights", "n_densities"];
/// Dimension names used for tables converted from the older array archives.
pub const LEGACY_DIMENSION_NAMES: [&str; 2] = [HEIGHT_VARIABLE_NAME, DENSITY_VARIABLE_NAME];

const CHIANTI_VERSION_ATTRIBUTE: &str = "chianti_version";
const ELECTRON_TEMPERATURE_ATTRIBUTE: &str = "electron_temperature";
const ABUNDANCES_ATTRIBUTE: &str = "abundances_basename";
const N_LEVELS_ATTRIBUTE: &str = "n_levels";
const INVERT_ATTRIBUTE: &str = "invert";
const LIMB_DARKENING_ATTRIBUTE: &str = "limbdark";
const PROTONS_ATTRIBUTE: &str = "protons";

/// Writes the given ratio table to a NetCDF file at the given path, using the
/// given names for the height and density dimensions.
///
/// The file is first written to a temporary path and then moved into place,
/// replacing any existing file.
pub fn write_ratio_table<P: AsRef<Path>>(
    table: &RatioTable,
    output_file_path: P,
    dimension_names: [&str; 2],
) -> io::Result<()> {
    let atomic_output_path = AtomicOutputPath::new(output_file_path)?;

    let mut file = io_result!(nc::create(atomic_output_path.temporary_path()))?;

    if let Some(metadata) = table.metadata() {
        write_metadata(&mut file, metadata)?;
    }

    let [height_dim_name, density_dim_name] = dimension_names;
    io_result!(file.add_dimension(height_dim_name, table.grid().n_heights()))?;
    io_result!(file.add_dimension(density_dim_name, table.grid().n_densities()))?;

    write_1d_variable(
        &mut file,
        HEIGHT_VARIABLE_NAME,
        height_dim_name,
        table.heights(),
    )?;
    write_1d_variable(
        &mut file,
        DENSITY_VARIABLE_NAME,
        density_dim_name,
        table.densities(),
    )?;

    let ratios: Vec<fnc> = table.ratios().iter().map(|&ratio| ratio as fnc).collect();
    io_result!(io_result!(
        file.add_variable::<fnc>(RATIO_VARIABLE_NAME, &[height_dim_name, density_dim_name])
    )?
    .put_values(&ratios, None, None))?;

    drop(file);
    atomic_output_path.perform_replace()
}

fn write_1d_variable(
    file: &mut MutableFile,
    name: &str,
    dimension_name: &str,
    values: &[fgr],
) -> io::Result<()> {
    let values: Vec<fnc> = values.iter().map(|&value| value as fnc).collect();
    io_result!(io_result!(file.add_variable::<fnc>(name, &[dimension_name]))?
        .put_values(&values, None, None))?;
    Ok(())
}

fn write_metadata(file: &mut MutableFile, metadata: &ProvenanceMetadata) -> io::Result<()> {
    io_result!(file.add_attribute(
        CHIANTI_VERSION_ATTRIBUTE,
        metadata.chianti_version.as_str()
    ))?;
    io_result!(file.add_attribute(
        ELECTRON_TEMPERATURE_ATTRIBUTE,
        metadata.electron_temperature
    ))?;
    io_result!(file.add_attribute(
        ABUNDANCES_ATTRIBUTE,
        metadata.abundances_basename.as_deref().unwrap_or("")
    ))?;
    io_result!(file.add_attribute(
        N_LEVELS_ATTRIBUTE,
        metadata
            .n_levels
            .map_or(fcn::NAN, |n_levels| n_levels as fcn)
    ))?;
    io_result!(file.add_attribute(INVERT_ATTRIBUTE, metadata.invert as u8))?;
    io_result!(file.add_attribute(LIMB_DARKENING_ATTRIBUTE, metadata.limb_darkening as u8))?;
    io_result!(file.add_attribute(PROTONS_ATTRIBUTE, metadata.protons as u8))?;
    Ok(())
}

/// Reads a ratio table from the NetCDF file at the given path.
///
/// Provenance is read if the file has a `chianti_version` attribute.
pub fn read_ratio_table<P: AsRef<Path>>(input_file_path: P) -> io::Result<RatioTable> {
    let file = open_file(input_file_path)?;

    let heights = read_1d_variable(&file, HEIGHT_VARIABLE_NAME)?;
    let densities = read_1d_variable(&file, DENSITY_VARIABLE_NAME)?;
    let grid = HeightDensityGrid::from_axes(heights, densities)?;
    let ratios = read_2d_variable(&file, RATIO_VARIABLE_NAME, grid.shape())?;

    let metadata = if file.attribute(CHIANTI_VERSION_ATTRIBUTE).is_some() {
        Some(read_metadata(&file)?)
    } else {
        None
    };

    RatioTable::new(grid, ratios, metadata)
}

/// Opens an existing NetCDF file at the given path.
pub fn open_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    io_result!(nc::open(path))
}

fn variable_not_found(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("Variable {} not found in NetCDF file", name),
    )
}

fn read_1d_variable(file: &File, name: &str) -> io::Result<Vec<fgr>> {
    let var = file
        .variable(name)
        .ok_or_else(|| variable_not_found(name))?;
    let dimensions = var.dimensions();
    if dimensions.len() != 1 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Variable {} in NetCDF file is not 1D", name),
        ));
    }
    let mut values = vec![0.0 as fnc; dimensions[0].len()];
    io_result!(var.values_to(&mut values, None, None))?;
    Ok(values.into_iter().map(fgr::from).collect())
}

fn read_2d_variable(file: &File, name: &str, shape: (usize, usize)) -> io::Result<Array2<frt>> {
    let var = file
        .variable(name)
        .ok_or_else(|| variable_not_found(name))?;
    let dimensions = var.dimensions();
    if dimensions.len() != 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Variable {} in NetCDF file is not 2D", name),
        ));
    }
    let file_shape = (dimensions[0].len(), dimensions[1].len());
    if file_shape != shape {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Variable {} in NetCDF file has shape {:?}, expected {:?}",
                name, file_shape, shape
            ),
        ));
    }
    let mut buffer = vec![0.0 as fnc; shape.0 * shape.1];
    io_result!(var.values_to(&mut buffer, None, None))?;
    let values = buffer.into_iter().map(frt::from).collect();
    Ok(Array2::from_shape_vec(shape, values).expect("Buffer length matches shape"))
}

fn read_metadata(file: &File) -> io::Result<ProvenanceMetadata> {
    let abundances_basename = read_string_attribute(file, ABUNDANCES_ATTRIBUTE)?;
    let n_levels = read_float_attribute(file, N_LEVELS_ATTRIBUTE)?;
    Ok(ProvenanceMetadata {
        chianti_version: read_string_attribute(file, CHIANTI_VERSION_ATTRIBUTE)?,
        electron_temperature: read_float_attribute(file, ELECTRON_TEMPERATURE_ATTRIBUTE)?,
        abundances_basename: (!abundances_basename.is_empty()).then(|| abundances_basename),
        n_levels: (!n_levels.is_nan()).then(|| n_levels as usize),
        invert: read_flag_attribute(file, INVERT_ATTRIBUTE)?,
        limb_darkening: read_flag_attribute(file, LIMB_DARKENING_ATTRIBUTE)?,
        protons: read_flag_attribute(file, PROTONS_ATTRIBUTE)?,
    })
}

fn read_attribute(file: &File, name: &str) -> io::Result<AttrValue> {
    io_result!(file
        .attribute(name)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Attribute {} not found in NetCDF file", name),
            )
        })?
        .value())
}

fn invalid_attribute_type(name: &str, expected: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Attribute {} in NetCDF file is not a {}", name, expected),
    )
}

fn read_string_attribute(file: &File, name: &str) -> io::Result<String> {
    match read_attribute(file, name)? {
        AttrValue::Str(s) => Ok(s),
        _ => Err(invalid_attribute_type(name, "string")),
    }
}

fn read_float_attribute(file: &File, name: &str) -> io::Result<fcn> {
    match read_attribute(file, name)? {
        AttrValue::Double(f) => Ok(f),
        AttrValue::Float(f) => Ok(fcn::from(f)),
        AttrValue::Longlong(i) => Ok(i as fcn),
        AttrValue::Int(i) => Ok(fcn::from(i)),
        _ => Err(invalid_attribute_type(name, "number")),
    }
}

fn read_flag_attribute(file: &File, name: &str) -> io::Result<bool> {
    match read_attribute(file, name)? {
        AttrValue::Uchar(i) => Ok(i != 0),
        AttrValue::Schar(i) => Ok(i != 0),
        AttrValue::Short(i) => Ok(i != 0),
        AttrValue::Int(i) => Ok(i != 0),
        AttrValue::Longlong(i) => Ok(i != 0),
        _ => Err(invalid_attribute_type(name, "flag")),
    }
}
