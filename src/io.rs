//! File input/output.

#[cfg(feature = "netcdf")]
pub mod netcdf;

#[cfg(feature = "npz")]
pub mod npz;

pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};

/// How much to print while performing long computations.
#[derive(Clone)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    /// Whether non-critical status messages should be printed.
    pub fn print_messages(&self) -> bool {
        matches!(self, Self::Messages)
    }

    /// Creates a progress bar with the given number of steps if progress
    /// should be shown.
    pub fn create_progress_bar(&self, n_steps: u64) -> Option<ProgressBar> {
        match self {
            Self::Progress(style) => {
                let progress_bar = ProgressBar::new(n_steps);
                progress_bar.set_style(style.clone());
                Some(progress_bar)
            }
            _ => None,
        }
    }
}

/// What to do when a file is about to be written over an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverwriteMode {
    Ask,
    Always,
    Never,
}
