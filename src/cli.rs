//! Command line interface.

pub mod build;
pub mod completions;
pub mod compute;
pub mod convert;
pub mod inspect;
pub mod lookup;
pub mod run;
pub mod utils;
