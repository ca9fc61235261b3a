//! Height and density grid underlying the line ratio tables.

use crate::num::{is_strictly_increasing, linspace, logspace};
use std::io;

/// Floating-point precision to use for grid coordinates.
#[allow(non_camel_case_types)]
pub type fgr = f64;

/// Specification of the height and density axes of a ratio table.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Number of heights.
    pub n_heights: usize,
    /// Smallest and largest height, measured from disk center [R_sun].
    pub height_limits: (fgr, fgr),
    /// Number of electron densities.
    pub n_densities: usize,
    /// Base-10 logarithms of the smallest and largest electron density [cm⁻³].
    pub log_density_limits: (fgr, fgr),
}

impl GridConfig {
    pub const DEFAULT_N_HEIGHTS: usize = 240;
    pub const DEFAULT_MIN_HEIGHT: fgr = 1.005;
    pub const DEFAULT_MAX_HEIGHT: fgr = 2.2;
    pub const DEFAULT_N_DENSITIES: usize = 120;
    pub const DEFAULT_MIN_LOG_DENSITY: fgr = 6.0;
    pub const DEFAULT_MAX_LOG_DENSITY: fgr = 12.0;

    /// Checks that the configuration describes two non-empty, strictly
    /// increasing axes that remain so when stored in single precision.
    pub fn validate(&self) -> io::Result<()> {
        validate_axis_config("heights", self.n_heights, self.height_limits)?;
        validate_axis_config("densities", self.n_densities, self.log_density_limits)?;
        validate_stored_axis("heights", &self.heights())?;
        validate_stored_axis("densities", &self.densities())
    }

    /// Evenly spaced heights [R_sun].
    pub fn heights(&self) -> Vec<fgr> {
        linspace(self.height_limits.0, self.height_limits.1, self.n_heights)
    }

    /// Electron densities [cm⁻³] with evenly spaced base-10 logarithms.
    pub fn densities(&self) -> Vec<fgr> {
        logspace(
            self.log_density_limits.0,
            self.log_density_limits.1,
            self.n_densities,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_heights: Self::DEFAULT_N_HEIGHTS,
            height_limits: (Self::DEFAULT_MIN_HEIGHT, Self::DEFAULT_MAX_HEIGHT),
            n_densities: Self::DEFAULT_N_DENSITIES,
            log_density_limits: (Self::DEFAULT_MIN_LOG_DENSITY, Self::DEFAULT_MAX_LOG_DENSITY),
        }
    }
}

fn validate_axis_config(axis_name: &str, count: usize, limits: (fgr, fgr)) -> io::Result<()> {
    if count == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Number of {} must be at least 1", axis_name),
        ));
    }
    if !limits.0.is_finite() || !limits.1.is_finite() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Limits for {} must be finite", axis_name),
        ));
    }
    if count > 1 && limits.1 <= limits.0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Upper limit for {} ({}) must be larger than lower limit ({})",
                axis_name, limits.1, limits.0
            ),
        ));
    }
    Ok(())
}

/// Table files store coordinates as `f32`, so every value must be finite and
/// distinct from its neighbours at that precision.
fn validate_stored_axis(axis_name: &str, values: &[fgr]) -> io::Result<()> {
    let stored: Vec<f32> = values.iter().map(|&value| value as f32).collect();
    if let Some(&value) = values
        .iter()
        .zip(&stored)
        .find(|(_, stored_value)| !stored_value.is_finite() || **stored_value <= 0.0)
        .map(|(value, _)| value)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Value {:e} for {} is not a positive single precision number",
                value, axis_name
            ),
        ));
    }
    if !is_strictly_increasing(&stored) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Values for {} are too closely spaced for single precision storage",
                axis_name
            ),
        ));
    }
    Ok(())
}

/// Regular grid of heights and electron densities.
///
/// Both axes are non-empty and strictly increasing. Heights are measured from
/// disk center in solar radii, densities are in cm⁻³.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightDensityGrid {
    heights: Vec<fgr>,
    densities: Vec<fgr>,
}

impl HeightDensityGrid {
    /// Creates the grid described by the given configuration.
    pub fn from_config(config: &GridConfig) -> io::Result<Self> {
        config.validate()?;
        Self::from_axes(config.heights(), config.densities())
    }

    /// Creates a grid from existing axis values, for instance read from a file.
    pub fn from_axes(heights: Vec<fgr>, densities: Vec<fgr>) -> io::Result<Self> {
        for (axis_name, values) in [("Height", &heights), ("Density", &densities)] {
            if values.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} axis is empty", axis_name),
                ));
            }
            if !is_strictly_increasing(values) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} axis is not strictly increasing", axis_name),
                ));
            }
        }
        Ok(Self { heights, densities })
    }

    pub fn heights(&self) -> &[fgr] {
        &self.heights
    }

    pub fn densities(&self) -> &[fgr] {
        &self.densities
    }

    pub fn n_heights(&self) -> usize {
        self.heights.len()
    }

    pub fn n_densities(&self) -> usize {
        self.densities.len()
    }

    /// Shape of tables defined on the grid, heights first.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_heights(), self.n_densities())
    }

    /// Returns the index `i` such that `heights[i] <= height <= heights[i + 1]`,
    /// or `None` if the height is outside the axis or the axis has a single value.
    pub fn find_height_interval(&self, height: fgr) -> Option<usize> {
        find_interval(&self.heights, height)
    }

    /// Returns the index `i` such that `densities[i] <= density <= densities[i + 1]`,
    /// or `None` if the density is outside the axis or the axis has a single value.
    pub fn find_density_interval(&self, density: fgr) -> Option<usize> {
        find_interval(&self.densities, density)
    }
}

fn find_interval(values: &[fgr], value: fgr) -> Option<usize> {
    if values.len() < 2 || !(value >= values[0] && value <= values[values.len() - 1]) {
        return None;
    }
    let upper = values.partition_point(|&coord| coord <= value);
    Some(upper.saturating_sub(1).min(values.len() - 2))
}
