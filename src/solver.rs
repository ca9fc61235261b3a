//! Interface to the ion physics code computing emergent line intensities.

#[cfg(feature = "python")]
pub mod pycelp;

use crate::constants::fcn;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

/// Environment variable holding the root directory of the CHIANTI database.
pub const DATABASE_ENV_VAR: &str = "XUVTOP";

/// Location and version of an installed CHIANTI atomic database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicDatabase {
    directory: PathBuf,
    version: String,
}

impl AtomicDatabase {
    /// Describes the database at the given directory with the given version.
    pub fn new<P: AsRef<Path>, S: Into<String>>(directory: P, version: S) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            version: version.into(),
        }
    }

    /// Describes the database at the given directory, reading the version
    /// from the first line of its `VERSION` file.
    pub fn from_directory<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let directory = directory.as_ref();
        let version_file_path = directory.join("VERSION");
        let text = fs::read_to_string(&version_file_path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!(
                    "Could not read CHIANTI version file {}: {}",
                    version_file_path.display(),
                    err
                ),
            )
        })?;
        let version = text.lines().next().map(str::trim).unwrap_or_default();
        if version.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("CHIANTI version file {} is empty", version_file_path.display()),
            ));
        }
        Ok(Self::new(directory, version))
    }

    /// Locates the database through the `XUVTOP` environment variable.
    pub fn from_env() -> io::Result<Self> {
        let directory = env::var_os(DATABASE_ENV_VAR).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Environment variable {} is not set", DATABASE_ENV_VAR),
            )
        })?;
        Self::from_directory(directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path of the abundance file with the given basename, e.g.
    /// `sun_coronal_2021_chianti`.
    pub fn abundance_file_path(&self, abundances_basename: &str) -> PathBuf {
        self.directory
            .join("abundance")
            .join(abundance_file_name(abundances_basename))
    }
}

/// Name of the abundance file with the given basename.
pub fn abundance_file_name(abundances_basename: &str) -> String {
    format!("{}.abund", abundances_basename)
}

/// Options for constructing an ion model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IonSolverConfig {
    /// Number of atomic levels to include, or all levels if `None`.
    pub n_levels: Option<usize>,
    /// Basename of the abundance file to use, or the database default if `None`.
    pub abundances_basename: Option<String>,
}

/// Plasma conditions for which the ion level populations are computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlasmaState {
    /// Electron density [cm⁻³].
    pub electron_density: fcn,
    /// Electron temperature [K].
    pub electron_temperature: fcn,
    /// Height above the photosphere [R_sun].
    pub height_above_photosphere: fcn,
    /// Angle between the magnetic field and the radial direction [deg].
    pub field_angle: fcn,
    /// Whether to account for limb darkening of the incident photospheric radiation.
    pub include_limb_darkening: bool,
    /// Whether to include collisions with protons.
    pub include_protons: bool,
}

/// Defines the capabilities of an ion model used to compute line intensities.
pub trait IonSolver {
    /// Returns the temperature of maximum formation of the ion [K].
    fn max_temperature(&mut self) -> io::Result<fcn>;

    /// Computes the rho-symmetric level populations for the given plasma state.
    fn compute_state(&mut self, state: &PlasmaState) -> io::Result<()>;

    /// Returns the emergent intensity of the line with the given wavelength [Å]
    /// for the most recently computed state.
    fn emission_line_intensity(&mut self, wavelength: fcn) -> io::Result<fcn>;

    /// Computes the state and returns the intensities of the lines with the
    /// given wavelengths.
    fn compute_line_intensities<const N: usize>(
        &mut self,
        state: &PlasmaState,
        wavelengths: &[fcn; N],
    ) -> io::Result<[fcn; N]>
    where
        Self: Sized,
    {
        self.compute_state(state)?;
        let mut intensities = [0.0; N];
        for (intensity, &wavelength) in intensities.iter_mut().zip(wavelengths) {
            *intensity = self.emission_line_intensity(wavelength)?;
        }
        Ok(intensities)
    }
}
