//! Utilities for input/output.

use super::OverwriteMode;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::TempPath;

/// Returns the conventional name of a ratio table file.
///
/// The optional tag is inserted before the `ratio` suffix, e.g.
/// `chianti_v10.0.1_pycelp_fe13_h240_d120_coronal_ratio.nc`.
pub fn default_output_file_name(
    chianti_version: &str,
    n_heights: usize,
    n_densities: usize,
    tag: Option<&str>,
) -> String {
    let tag = tag.map(|tag| format!("{}_", tag)).unwrap_or_default();
    format!(
        "chianti_v{}_pycelp_fe13_h{}_d{}_{}ratio.nc",
        chianti_version, n_heights, n_densities, tag
    )
}

/// Asks the user a yes/no question on standard output and reads the answer
/// from standard input. An empty answer gives the default.
pub fn user_says_yes(question: &str, default_is_yes: bool) -> io::Result<bool> {
    let options = if default_is_yes { "[Y/n]" } else { "[y/N]" };
    loop {
        print!("{} {} ", question, options);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;

        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default_is_yes),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer yes or no"),
        }
    }
}

/// Decides whether the file at the given path may be written, consulting the
/// user if the file exists and the mode is `Ask`.
pub fn write_allowed<P: AsRef<Path>>(file_path: P, mode: OverwriteMode) -> io::Result<bool> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Ok(true);
    }
    match mode {
        OverwriteMode::Always => Ok(true),
        OverwriteMode::Never => Ok(false),
        OverwriteMode::Ask => user_says_yes(
            &format!("File {} already exists, overwrite?", file_path.display()),
            false,
        ),
    }
}

/// Creates the parent directories of the given file path if they do not exist.
pub fn create_directory_if_missing<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    match file_path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Output path that is written through a temporary file in the same directory.
///
/// The temporary file replaces the target only when `perform_replace` is
/// called, so an interrupted or failed write leaves no partial output behind.
/// The temporary file is removed if the object is dropped before that.
#[derive(Debug)]
pub struct AtomicOutputPath {
    target_path: PathBuf,
    temporary_path: TempPath,
}

impl AtomicOutputPath {
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        create_directory_if_missing(&target_path)?;
        let directory = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temporary_path = tempfile::Builder::new()
            .prefix(".ucomp-density-")
            .suffix(".tmp")
            .tempfile_in(directory)?
            .into_temp_path();
        Ok(Self {
            target_path,
            temporary_path,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn temporary_path(&self) -> &Path {
        &self.temporary_path
    }

    /// Moves the temporary file to the target path.
    pub fn perform_replace(self) -> io::Result<()> {
        self.temporary_path
            .persist(&self.target_path)
            .map_err(|err| err.error)
    }
}
