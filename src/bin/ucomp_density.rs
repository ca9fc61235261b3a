//! Command line runner for the `ucomp_density` library.

#[cfg(not(feature = "for-testing"))]
#[quit::main]
fn main() {
    ucomp_density::cli::run::run();
}

#[cfg(feature = "for-testing")]
fn main() {
    eprintln!(
        "Warning: The `for-testing` feature is enabled, which turns errors into panics\n\
         Tip: Use cargo flag --features=all-non-testing to include all features except `for-testing`"
    );
    ucomp_density::cli::run::run();
}
