//! Physical constants and fixed parameters of the Fe XIII density diagnostic.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

/// CHIANTI name of the ion providing the diagnostic lines.
pub const ION_NAME: &str = "fe_13";

/// Air wavelength of the Fe XIII 1074.7 nm line as identified in CHIANTI [Å].
pub const FE13_1074_WAVELENGTH: fcn = 10747.0;
/// Air wavelength of the Fe XIII 1078.9 nm line as identified in CHIANTI [Å].
pub const FE13_1079_WAVELENGTH: fcn = 10789.0;

/// Wavelengths of the two lines whose ratio is tabulated, numerator first.
pub const DIAGNOSTIC_WAVELENGTHS: [fcn; 2] = [FE13_1074_WAVELENGTH, FE13_1079_WAVELENGTH];

/// Temperature of maximum Fe XIII formation given by the SolarSoft CHIANTI
/// routine `MAX_TEMP` [K].
pub const CHIANTI_MAX_TEMPERATURE: fcn = 1778279.0;

/// Angle between the local magnetic field and the radial direction [deg].
/// The line ratio is practically insensitive to it, so a radial field is assumed.
pub const RADIAL_FIELD_ANGLE: fcn = 0.0;

/// Radius of the Sun in units of solar radii, used to convert heights measured
/// from disk center into heights above the photosphere.
pub const SOLAR_RADIUS: fcn = 1.0;
