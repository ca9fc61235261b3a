//! Interpolation in ratio tables, used to infer electron densities from
//! observed line ratios.
//!
//! Interpolation is linear in height and in the base-10 logarithm of the
//! electron density, matching the logarithmic spacing of the density axis.

use crate::{
    grid::fgr,
    ratio::{frt, RatioTable},
};
use ndarray::{Array1, ArrayView1};

impl RatioTable {
    /// Computes the line ratio at the given height [R_sun] and electron
    /// density [cm⁻³] by bilinear interpolation.
    ///
    /// Returns `None` if the point lies outside the table.
    pub fn interpolate_ratio(&self, height: fgr, density: fgr) -> Option<frt> {
        let row = self.ratios_at_height(height)?;
        let densities = self.densities();
        if densities.len() == 1 {
            return (density == densities[0]).then(|| row[0]);
        }
        let idx = self.grid().find_density_interval(density)?;
        let weight = interpolation_weight(
            densities[idx].log10(),
            densities[idx + 1].log10(),
            density.log10(),
        );
        Some(lerp(row[idx], row[idx + 1], weight))
    }

    /// Infers the electron density [cm⁻³] that produces the given line ratio at
    /// the given height [R_sun].
    ///
    /// The ratio curve at the height is scanned from low to high density and the
    /// first interval enclosing the ratio is used. Returns `None` if the height
    /// is outside the table or no density on the axis gives the ratio.
    pub fn infer_density(&self, height: fgr, ratio: frt) -> Option<fgr> {
        if !ratio.is_finite() {
            return None;
        }
        let row = self.ratios_at_height(height)?;
        let densities = self.densities();
        if densities.len() == 1 {
            return (row[0] == ratio).then(|| densities[0]);
        }
        row.windows(2)
            .into_iter()
            .position(|pair| encloses(pair[0], pair[1], ratio))
            .map(|idx| {
                let lower = densities[idx].log10();
                let upper = densities[idx + 1].log10();
                let weight = if row[idx + 1] == row[idx] {
                    0.0
                } else {
                    interpolation_weight(row[idx], row[idx + 1], ratio)
                };
                fgr::powf(10.0, lerp(lower, upper, weight))
            })
    }

    /// Returns the ratios along the density axis at the given height, linearly
    /// interpolated between the two closest rows of the table.
    pub fn ratios_at_height(&self, height: fgr) -> Option<Array1<frt>> {
        let heights = self.heights();
        let ratios = self.ratios();
        if heights.len() == 1 {
            return (height == heights[0]).then(|| ratios.row(0).to_owned());
        }
        let idx = self.grid().find_height_interval(height)?;
        let weight = interpolation_weight(heights[idx], heights[idx + 1], height);
        Some(lerp_rows(ratios.row(idx), ratios.row(idx + 1), weight))
    }
}

fn interpolation_weight(lower: fgr, upper: fgr, value: fgr) -> fgr {
    (value - lower) / (upper - lower)
}

fn lerp(lower: fgr, upper: fgr, weight: fgr) -> fgr {
    lower + weight * (upper - lower)
}

fn lerp_rows(lower: ArrayView1<frt>, upper: ArrayView1<frt>, weight: fgr) -> Array1<frt> {
    let mut row = lower.to_owned();
    row.zip_mut_with(&upper, |low, &up| *low = lerp(*low, up, weight));
    row
}

fn encloses(first: frt, second: frt, value: frt) -> bool {
    (first <= value && value <= second) || (second <= value && value <= first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HeightDensityGrid;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn create_table() -> RatioTable {
        let grid =
            HeightDensityGrid::from_axes(vec![1.0, 2.0], vec![1e6, 1e7, 1e8, 1e9]).unwrap();
        let ratios = array![[0.2, 0.4, 0.6, 0.8], [0.3, 0.5, 0.7, 0.9]];
        RatioTable::new(grid, ratios, None).unwrap()
    }

    #[test]
    fn ratio_is_interpolated_bilinearly() {
        let table = create_table();
        assert_relative_eq!(table.interpolate_ratio(1.0, 1e7).unwrap(), 0.4);
        assert_relative_eq!(table.interpolate_ratio(1.5, 1e7).unwrap(), 0.45);
        let midpoint_density = fgr::powf(10.0, 7.5);
        assert_relative_eq!(
            table.interpolate_ratio(1.5, midpoint_density).unwrap(),
            0.55,
            max_relative = 1e-12
        );
        assert!(table.interpolate_ratio(2.5, 1e7).is_none());
        assert!(table.interpolate_ratio(1.5, 1e10).is_none());
    }

    #[test]
    fn density_is_inferred_from_ratio() {
        let table = create_table();
        assert_relative_eq!(
            table.infer_density(1.0, 0.4).unwrap(),
            1e7,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            table.infer_density(1.0, 0.5).unwrap(),
            fgr::powf(10.0, 7.5),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            table.infer_density(1.5, 0.65).unwrap(),
            1e8,
            max_relative = 1e-12
        );
        assert!(table.infer_density(1.0, 0.1).is_none());
        assert!(table.infer_density(3.0, 0.4).is_none());
        assert!(table.infer_density(1.0, frt::NAN).is_none());
    }

    #[test]
    fn decreasing_ratio_curves_are_supported() {
        let grid = HeightDensityGrid::from_axes(vec![1.1], vec![1e6, 1e8]).unwrap();
        let table = RatioTable::new(grid, array![[2.0, 1.0]], None).unwrap();
        assert_relative_eq!(
            table.infer_density(1.1, 1.5).unwrap(),
            1e7,
            max_relative = 1e-12
        );
        assert!(table.infer_density(1.2, 1.5).is_none());
    }

    #[test]
    fn interpolation_inverts_density_inference() {
        let table = create_table();
        let density = table.infer_density(1.25, 0.61).unwrap();
        assert_relative_eq!(
            table.interpolate_ratio(1.25, density).unwrap(),
            0.61,
            max_relative = 1e-12
        );
    }
}
