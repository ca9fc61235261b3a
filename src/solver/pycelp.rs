//! Ion solver backed by the pycelp Python package.

use super::{AtomicDatabase, IonSolver, IonSolverConfig, PlasmaState, DATABASE_ENV_VAR};
use crate::constants::fcn;
use pyo3::{types::IntoPyDict, IntoPy, Py, PyAny, PyErr, PyResult, Python};
use std::io;

/// Runs the given closure with the Python interpreter, converting any raised
/// Python exception into an `io::Error`.
fn run_python_with_result<C, R>(command: C) -> io::Result<R>
where
    C: FnOnce(Python) -> PyResult<R>,
{
    Python::with_gil(|py| command(py).map_err(|err| python_error_to_io_error(py, err)))
}

fn python_error_to_io_error(py: Python, err: PyErr) -> io::Error {
    let traceback = err
        .traceback(py)
        .and_then(|traceback| traceback.format().ok())
        .unwrap_or_default();
    io::Error::new(
        io::ErrorKind::Other,
        format!("Python error: {}\n{}", err, traceback),
    )
}

/// Makes the site packages of the build-time Python installation importable.
/// Entries already on `sys.path` are left alone.
fn set_pythonpaths(py: Python) -> PyResult<()> {
    let pythonpaths = py.import("sys")?.getattr("path")?;
    for pythonpath in env!("PYTHONPATH").split(':') {
        if !pythonpaths.contains(pythonpath)? {
            pythonpaths.call_method1("insert", (0, pythonpath))?;
        }
    }
    Ok(())
}

/// Fe XIII (or other ion) model evaluated by pycelp.
pub struct PycelpIon {
    ion: Py<PyAny>,
}

impl PycelpIon {
    /// Constructs the pycelp model for the given ion using the given database.
    ///
    /// The database location is handed to pycelp through `XUVTOP` in the
    /// interpreter environment before the package is imported.
    pub fn new(
        database: &AtomicDatabase,
        ion_name: &str,
        config: &IonSolverConfig,
    ) -> io::Result<Self> {
        let abundance_file_path = config
            .abundances_basename
            .as_ref()
            .map(|basename| {
                database
                    .abundance_file_path(basename)
                    .to_string_lossy()
                    .into_owned()
            });

        let ion = run_python_with_result(|py| {
            set_pythonpaths(py)?;
            py.import("os")?.getattr("environ")?.set_item(
                DATABASE_ENV_VAR,
                database.directory().to_string_lossy().as_ref(),
            )?;

            let pycelp = py.import("pycelp")?;
            let kwargs = [
                ("nlevels", config.n_levels.into_py(py)),
                ("abundFile", abundance_file_path.into_py(py)),
            ]
            .into_py_dict(py);

            let ion = pycelp
                .getattr("Ion")?
                .call((ion_name,), Some(kwargs))?;
            Ok(ion.into_py(py))
        })?;

        Ok(Self { ion })
    }
}

impl IonSolver for PycelpIon {
    fn max_temperature(&mut self) -> io::Result<fcn> {
        run_python_with_result(|py| {
            self.ion
                .as_ref(py)
                .call_method0("get_maxtemp")?
                .extract()
        })
    }

    fn compute_state(&mut self, state: &PlasmaState) -> io::Result<()> {
        run_python_with_result(|py| {
            let kwargs = [
                ("include_limbdark", state.include_limb_darkening),
                ("include_protons", state.include_protons),
            ]
            .into_py_dict(py);
            self.ion.as_ref(py).call_method(
                "calc_rho_sym",
                (
                    state.electron_density,
                    state.electron_temperature,
                    state.height_above_photosphere,
                    state.field_angle,
                ),
                Some(kwargs),
            )?;
            Ok(())
        })
    }

    fn emission_line_intensity(&mut self, wavelength: fcn) -> io::Result<fcn> {
        run_python_with_result(|py| {
            self.ion
                .as_ref(py)
                .call_method1("get_emissionLine", (wavelength,))?
                .call_method0("calc_Iemiss")?
                .get_item(0)?
                .extract()
        })
    }
}
