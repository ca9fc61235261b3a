//! The `ucomp_density` crate computes Fe XIII line ratio tables used for
//! coronal electron density diagnostics in the UCoMP pipeline.

#[cfg(feature = "cli")]
pub mod cli;

pub mod constants;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod io;
pub mod num;
pub mod ratio;
pub mod solver;
