//! Utilities related to numbers.

use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat:
    Sync + Send + num::Float + num::cast::FromPrimitive + ieee754::Ieee754 + fmt::Debug
{
}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Returns `n` evenly spaced values from `lower` to `upper`, both included.
///
/// A single value is just `lower`. The end point is assigned exactly so that
/// floating point drift never moves it past `upper`.
pub fn linspace<F: BFloat>(lower: F, upper: F, n: usize) -> Vec<F> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let step = (upper - lower) / F::from_usize(n - 1).unwrap();
            let mut values: Vec<F> = (0..n)
                .map(|idx| lower + F::from_usize(idx).unwrap() * step)
                .collect();
            values[n - 1] = upper;
            values
        }
    }
}

/// Returns `n` values whose base-10 logarithms are evenly spaced from
/// `lower_exponent` to `upper_exponent`, both included.
pub fn logspace<F: BFloat>(lower_exponent: F, upper_exponent: F, n: usize) -> Vec<F> {
    let ten = F::from_f64(10.0).unwrap();
    linspace(lower_exponent, upper_exponent, n)
        .into_iter()
        .map(|exponent| ten.powf(exponent))
        .collect()
}

/// Whether each value in the slice is strictly larger than the previous one.
pub fn is_strictly_increasing<F: BFloat>(values: &[F]) -> bool {
    values.windows(2).all(|pair| pair[1] > pair[0])
}
