#![allow(dead_code)]

use std::io;
use ucomp_density::{
    constants::{fcn, DIAGNOSTIC_WAVELENGTHS},
    grid::GridConfig,
    ratio::RatioTableConfig,
    solver::{IonSolver, PlasmaState},
};

pub const TEMPERATURE: fcn = 1676832.0;

/// Solver returning the same pair of intensities for every state.
pub struct ConstantSolver {
    pub intensities: [fcn; 2],
    state_computed: bool,
}

impl ConstantSolver {
    pub fn new(intensities: [fcn; 2]) -> Self {
        Self {
            intensities,
            state_computed: false,
        }
    }
}

impl IonSolver for ConstantSolver {
    fn max_temperature(&mut self) -> io::Result<fcn> {
        Ok(TEMPERATURE)
    }

    fn compute_state(&mut self, _state: &PlasmaState) -> io::Result<()> {
        self.state_computed = true;
        Ok(())
    }

    fn emission_line_intensity(&mut self, wavelength: fcn) -> io::Result<fcn> {
        assert!(self.state_computed, "Intensity requested before state");
        line_index(wavelength).map(|idx| self.intensities[idx])
    }
}

/// Solver with intensities depending smoothly on height and density:
/// `I(1074) = log10(n_e)*(1 + h)` and `I(1079) = 2 + h`, with `h` the height
/// above the photosphere.
pub struct SmoothSolver {
    state: Option<PlasmaState>,
}

impl SmoothSolver {
    pub fn new() -> Self {
        Self { state: None }
    }
}

impl IonSolver for SmoothSolver {
    fn max_temperature(&mut self) -> io::Result<fcn> {
        Ok(TEMPERATURE)
    }

    fn compute_state(&mut self, state: &PlasmaState) -> io::Result<()> {
        self.state = Some(*state);
        Ok(())
    }

    fn emission_line_intensity(&mut self, wavelength: fcn) -> io::Result<fcn> {
        let state = self.state.expect("Intensity requested before state");
        let height = state.height_above_photosphere;
        match line_index(wavelength)? {
            0 => Ok(state.electron_density.log10() * (1.0 + height)),
            _ => Ok(2.0 + height),
        }
    }
}

/// Solver that fails once it has computed the given number of states.
pub struct FailingSolver {
    remaining_states: usize,
}

impl FailingSolver {
    pub fn new(remaining_states: usize) -> Self {
        Self { remaining_states }
    }
}

impl IonSolver for FailingSolver {
    fn max_temperature(&mut self) -> io::Result<fcn> {
        Ok(TEMPERATURE)
    }

    fn compute_state(&mut self, _state: &PlasmaState) -> io::Result<()> {
        if self.remaining_states == 0 {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "Level populations did not converge",
            ));
        }
        self.remaining_states -= 1;
        Ok(())
    }

    fn emission_line_intensity(&mut self, _wavelength: fcn) -> io::Result<fcn> {
        Ok(1.0)
    }
}

/// Solver recording every state and requested wavelength.
#[derive(Default)]
pub struct RecordingSolver {
    pub states: Vec<PlasmaState>,
    pub wavelengths: Vec<fcn>,
}

impl IonSolver for RecordingSolver {
    fn max_temperature(&mut self) -> io::Result<fcn> {
        Ok(TEMPERATURE)
    }

    fn compute_state(&mut self, state: &PlasmaState) -> io::Result<()> {
        self.states.push(*state);
        Ok(())
    }

    fn emission_line_intensity(&mut self, wavelength: fcn) -> io::Result<fcn> {
        self.wavelengths.push(wavelength);
        Ok(1.0)
    }
}

fn line_index(wavelength: fcn) -> io::Result<usize> {
    DIAGNOSTIC_WAVELENGTHS
        .iter()
        .position(|&diagnostic| diagnostic == wavelength)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("No data for line at {} Å", wavelength),
            )
        })
}

/// Configuration for a 3×3 table spanning heights 1.01-2.0 and densities 1e6-1e12.
pub fn three_by_three_config(invert: bool) -> RatioTableConfig {
    RatioTableConfig {
        grid: GridConfig {
            n_heights: 3,
            height_limits: (1.01, 2.0),
            n_densities: 3,
            log_density_limits: (6.0, 12.0),
        },
        invert,
        ..RatioTableConfig::default()
    }
}

/// Runs the command line program with the given arguments.
#[cfg(feature = "cli")]
pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = std::iter::once(std::ffi::OsString::from("ucomp-density"))
        .chain(args.into_iter().map(Into::into));
    ucomp_density::cli::run::run_with_args(ucomp_density::cli::build::build().get_matches_from(args));
}

/// Writes the given axes and ratios to an `.npz` archive the way NumPy's
/// `savez` does.
#[cfg(feature = "npz")]
pub fn write_npz<A: ndarray_npy::WritableElement>(
    path: &std::path::Path,
    heights: &ndarray::Array1<A>,
    densities: &ndarray::Array1<A>,
    ratios: &ndarray::Array2<A>,
) {
    let mut npz = ndarray_npy::NpzWriter::new(std::fs::File::create(path).unwrap());
    npz.add_array("h", heights).unwrap();
    npz.add_array("den", densities).unwrap();
    npz.add_array("rat", ratios).unwrap();
    npz.finish().unwrap();
}
