//! Computation of Fe XIII line ratio tables on a height and density grid.

use crate::{
    constants::{
        fcn, CHIANTI_MAX_TEMPERATURE, DIAGNOSTIC_WAVELENGTHS, RADIAL_FIELD_ANGLE, SOLAR_RADIUS,
    },
    grid::{fgr, GridConfig, HeightDensityGrid},
    io::Verbosity,
    solver::{abundance_file_name, IonSolver, IonSolverConfig, PlasmaState},
};
use ndarray::{Array2, Array3, Axis, Zip};
use std::io;

/// Floating-point precision to use for line ratios.
#[allow(non_camel_case_types)]
pub type frt = f64;

/// How the electron temperature assumed for the whole table is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureMode {
    /// Use the temperature of maximum formation reported by the ion model.
    IonMaximum,
    /// Use the fixed temperature given by the SolarSoft CHIANTI `MAX_TEMP` routine.
    ChiantiMaximum,
}

impl TemperatureMode {
    /// Returns the electron temperature [K] for this mode.
    pub fn resolve<S: IonSolver>(&self, solver: &mut S) -> io::Result<fcn> {
        match self {
            Self::IonMaximum => solver.max_temperature(),
            Self::ChiantiMaximum => Ok(CHIANTI_MAX_TEMPERATURE),
        }
    }
}

/// Options for computing a ratio table.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioTableConfig {
    pub grid: GridConfig,
    pub temperature_mode: TemperatureMode,
    /// Whether to tabulate I(1079)/I(1074) instead of I(1074)/I(1079).
    pub invert: bool,
    pub include_limb_darkening: bool,
    pub include_protons: bool,
    pub solver: IonSolverConfig,
}

impl Default for RatioTableConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            temperature_mode: TemperatureMode::IonMaximum,
            invert: false,
            include_limb_darkening: true,
            include_protons: true,
            solver: IonSolverConfig::default(),
        }
    }
}

/// Record of the assumptions and software version behind a ratio table.
#[derive(Clone, Debug, PartialEq)]
pub struct ProvenanceMetadata {
    pub chianti_version: String,
    /// Electron temperature [K].
    pub electron_temperature: fcn,
    /// Name of the abundance file, e.g. `sun_coronal_2021_chianti.abund`.
    pub abundances_basename: Option<String>,
    pub n_levels: Option<usize>,
    pub invert: bool,
    pub limb_darkening: bool,
    pub protons: bool,
}

/// Line ratios tabulated over heights and electron densities.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioTable {
    grid: HeightDensityGrid,
    ratios: Array2<frt>,
    metadata: Option<ProvenanceMetadata>,
}

impl RatioTable {
    /// Assembles a table from a grid and ratios with shape `(n_heights, n_densities)`.
    pub fn new(
        grid: HeightDensityGrid,
        ratios: Array2<frt>,
        metadata: Option<ProvenanceMetadata>,
    ) -> io::Result<Self> {
        if ratios.dim() != grid.shape() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Ratio table shape {:?} does not match grid shape {:?}",
                    ratios.dim(),
                    grid.shape()
                ),
            ));
        }
        Ok(Self {
            grid,
            ratios,
            metadata,
        })
    }

    pub fn grid(&self) -> &HeightDensityGrid {
        &self.grid
    }

    pub fn heights(&self) -> &[fgr] {
        self.grid.heights()
    }

    pub fn densities(&self) -> &[fgr] {
        self.grid.densities()
    }

    pub fn ratios(&self) -> &Array2<frt> {
        &self.ratios
    }

    pub fn metadata(&self) -> Option<&ProvenanceMetadata> {
        self.metadata.as_ref()
    }
}

/// Computes a line ratio table by evaluating the ion model at every grid point.
///
/// Heights form the outer loop and densities the inner loop. Any failure of the
/// solver aborts the computation. Vanishing intensities are not guarded against
/// and give non-finite ratios.
pub fn compute_ratio_table<S: IonSolver>(
    solver: &mut S,
    chianti_version: &str,
    config: &RatioTableConfig,
    verbosity: &Verbosity,
) -> io::Result<RatioTable> {
    let grid = HeightDensityGrid::from_config(&config.grid)?;
    let electron_temperature = config.temperature_mode.resolve(solver)?;

    let intensities = compute_intensities(
        solver,
        &grid,
        electron_temperature,
        config.include_limb_darkening,
        config.include_protons,
        verbosity,
    )?;
    let ratios = ratios_from_intensities(&intensities, config.invert);

    let metadata = ProvenanceMetadata {
        chianti_version: chianti_version.to_string(),
        electron_temperature,
        abundances_basename: config
            .solver
            .abundances_basename
            .as_deref()
            .map(abundance_file_name),
        n_levels: config.solver.n_levels,
        invert: config.invert,
        limb_darkening: config.include_limb_darkening,
        protons: config.include_protons,
    };

    RatioTable::new(grid, ratios, Some(metadata))
}

/// Evaluates the diagnostic line intensities over the grid, returning an array
/// with shape `(2, n_heights, n_densities)`.
fn compute_intensities<S: IonSolver>(
    solver: &mut S,
    grid: &HeightDensityGrid,
    electron_temperature: fcn,
    include_limb_darkening: bool,
    include_protons: bool,
    verbosity: &Verbosity,
) -> io::Result<Array3<frt>> {
    let (n_heights, n_densities) = grid.shape();
    let mut intensities = Array3::zeros((DIAGNOSTIC_WAVELENGTHS.len(), n_heights, n_densities));

    let progress_bar = verbosity.create_progress_bar(n_heights as u64);

    for (height_idx, &height) in grid.heights().iter().enumerate() {
        if verbosity.print_messages() {
            println!("{} / {}: {:0.2} R_sun", height_idx + 1, n_heights, height);
        }
        for (density_idx, &density) in grid.densities().iter().enumerate() {
            let state = PlasmaState {
                electron_density: density,
                electron_temperature,
                height_above_photosphere: height - SOLAR_RADIUS,
                field_angle: RADIAL_FIELD_ANGLE,
                include_limb_darkening,
                include_protons,
            };
            let line_intensities =
                solver.compute_line_intensities(&state, &DIAGNOSTIC_WAVELENGTHS)?;
            for (line_idx, intensity) in line_intensities.into_iter().enumerate() {
                intensities[[line_idx, height_idx, density_idx]] = intensity;
            }
        }
        if let Some(progress_bar) = &progress_bar {
            progress_bar.inc(1);
        }
    }
    if let Some(progress_bar) = progress_bar {
        progress_bar.finish();
    }
    Ok(intensities)
}

/// Divides the first line's intensities by the second's, or the other way
/// around if `invert` is set.
fn ratios_from_intensities(intensities: &Array3<frt>, invert: bool) -> Array2<frt> {
    let first = intensities.index_axis(Axis(0), 0);
    let second = intensities.index_axis(Axis(0), 1);
    let (numerator, denominator) = if invert {
        (second, first)
    } else {
        (first, second)
    };
    Zip::from(&numerator)
        .and(&denominator)
        .map_collect(|&num, &den| num / den)
}
