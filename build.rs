//! Build script embedding the location of the Python installation used for
//! running pycelp, so that the interpreter can find its standard library and
//! site packages at run time.

#[cfg(feature = "python")]
use std::{
    env,
    path::{Path, PathBuf},
    process::{self, Command},
};

#[cfg(feature = "python")]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        process::exit(1)
    }};
}

#[cfg(feature = "python")]
fn locate_python_executable() -> PathBuf {
    let python_name = env::var("UCOMP_DENSITY_PYTHON")
        .or_else(|_| env::var("PYO3_PYTHON"))
        .unwrap_or_else(|_| "python3".to_string());

    let output = Command::new("which")
        .arg(&python_name)
        .output()
        .unwrap_or_else(|err| {
            exit_with_error!("Error: Could not determine location of {}: {}", python_name, err)
        });

    let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim_end());
    if !path.exists() {
        exit_with_error!(
            "Error: Could not find Python executable {}\n\
             Tip: Set UCOMP_DENSITY_PYTHON to the interpreter that has pycelp installed",
            python_name
        );
    }
    path.canonicalize().unwrap_or_else(|err| {
        exit_with_error!("Error: Could not resolve path to Python executable: {}", err)
    })
}

#[cfg(feature = "python")]
fn python_root(python_exec_path: &Path) -> &Path {
    python_exec_path
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| {
            exit_with_error!(
                "Error: Could not extract root path from Python executable path {}",
                python_exec_path.display()
            )
        })
}

#[cfg(not(feature = "python"))]
fn setup_python() {}
#[cfg(feature = "python")]
fn setup_python() {
    println!("cargo:rerun-if-env-changed=UCOMP_DENSITY_PYTHON");
    println!("cargo:rerun-if-env-changed=PYO3_PYTHON");

    let python_exec_path = locate_python_executable();
    let python_binary_name = python_exec_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "python3".to_string());
    let root_path = python_root(&python_exec_path);

    println!("cargo:rustc-env=PYTHONHOME={}", root_path.display());
    println!(
        "cargo:rustc-env=PYTHONPATH={}",
        root_path
            .join("lib")
            .join(python_binary_name)
            .join("site-packages")
            .display()
    );
}

fn main() {
    setup_python();
}
