//! Reading of ratio tables stored in NumPy `.npz` archives.
//!
//! Early tables were saved with `numpy.savez_compressed` as the arrays `h`,
//! `den` and `rat` without any provenance. Both float64 and float32 arrays
//! are accepted.

use crate::{
    grid::{fgr, HeightDensityGrid},
    io_result,
    ratio::{frt, RatioTable},
};
use ndarray::{Array, Array1, Array2, Dimension, OwnedRepr};
use ndarray_npy::NpzReader;
use std::{fs, io, path::Path};

/// Reads the ratio table in the `.npz` archive at the given path.
pub fn read_legacy_ratio_table<P: AsRef<Path>>(input_file_path: P) -> io::Result<RatioTable> {
    let input_file_path = input_file_path.as_ref();
    let mut npz = io_result!(NpzReader::new(fs::File::open(input_file_path)?))?;

    let heights: Array1<fgr> = read_array(&mut npz, "h")?;
    let densities: Array1<fgr> = read_array(&mut npz, "den")?;
    let ratios: Array2<frt> = read_array(&mut npz, "rat")?;

    let grid = HeightDensityGrid::from_axes(heights.to_vec(), densities.to_vec())?;
    RatioTable::new(grid, ratios, None)
}

/// Reads the named array as `f64`, widening it if it is stored as `f32`.
fn read_array<R, D>(npz: &mut NpzReader<R>, name: &str) -> io::Result<Array<f64, D>>
where
    R: io::Read + io::Seek,
    D: Dimension,
{
    let member_names = io_result!(npz.names())?;
    let member_name = member_names
        .into_iter()
        .find(|member| is_member_for(member, name))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Array {} not found in npz archive", name),
            )
        })?;

    let values = npz
        .by_name::<OwnedRepr<f64>, D>(&member_name)
        .or_else(|err| {
            npz.by_name::<OwnedRepr<f32>, D>(&member_name)
                .map(|values| values.mapv(f64::from))
                .map_err(|_| err)
        });
    io_result!(values)
}

/// Whether the archive member holds the array with the given name. NumPy
/// appends `.npy` to member names, but not every writer does.
fn is_member_for(member_name: &str, array_name: &str) -> bool {
    member_name == array_name || member_name.strip_suffix(".npy") == Some(array_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_names_match_with_and_without_extension() {
        assert!(is_member_for("rat.npy", "rat"));
        assert!(is_member_for("rat", "rat"));
        assert!(!is_member_for("ratio.npy", "rat"));
        assert!(!is_member_for("h.npy", "den"));
    }
}
