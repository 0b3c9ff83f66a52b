//! Deployment sequencer, from the folded state to the deployed state.
use crate::{FoldingState, HoopTruss};

/// Evenly spaced values including both ends.
///
/// A single value is the start, an empty count produces nothing.
///
/// ```
/// let v = hoop_truss::linspace(0., 1., 5).collect::<Vec<_>>();
/// assert_eq!(v, [0., 0.25, 0.5, 0.75, 1.]);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> impl ExactSizeIterator<Item = f64> + Clone {
    let step = if count > 1 { (end - start) / (count - 1) as f64 } else { 0. };
    (0..count).map(move |i| start + i as f64 * step)
}

impl HoopTruss {
    /// Lazy deployment sequence, in ascending angle order.
    pub fn sequence_iter(
        &self,
        start: f64,
        end: f64,
        count: usize,
    ) -> impl ExactSizeIterator<Item = FoldingState> + '_ {
        linspace(start, end, count).map(move |phi| self.solve(phi))
    }

    /// Deployment sequence in the angle bounds of the mechanism.
    pub fn deployment(&self, count: usize) -> Vec<FoldingState> {
        let [start, end] = self.angle_bound();
        generate_sequence(self, start, end, count)
    }
}

/// Solve `count` folding states evenly spaced in `[start, end]`.
///
/// ```
/// use hoop_truss::{generate_sequence, HoopTruss};
/// use std::f64::consts::{FRAC_PI_2, PI};
/// let seq = generate_sequence(&HoopTruss::example(), PI / 12., FRAC_PI_2, 3);
/// assert_eq!(seq.len(), 3);
/// assert!((seq[1].phi - 7. * PI / 24.).abs() < 1e-12);
/// ```
pub fn generate_sequence(
    hoop: &HoopTruss,
    start: f64,
    end: f64,
    count: usize,
) -> Vec<FoldingState> {
    hoop.sequence_iter(start, end, count).collect()
}

/// Parallel version of [`generate_sequence()`], the order is preserved.
#[cfg(feature = "rayon")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "rayon")))]
pub fn par_sequence(hoop: &HoopTruss, start: f64, end: f64, count: usize) -> Vec<FoldingState> {
    use rayon::prelude::*;
    linspace(start, end, count)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|phi| hoop.solve(phi))
        .collect()
}
