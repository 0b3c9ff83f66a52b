//! Hoop truss mechanism and its kinematic solver.
pub use self::state::*;
use nalgebra as na;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

mod state;

/// Divisor floor of the midpoint direction, for a midpoint on the origin.
pub const RADIAL_EPS: f64 = 1e-12;

/// Hoop truss made of `unit` scissor-like (7R) units.
///
/// # Parameters
///
/// + Unit count `unit` (n)
/// + Scissor arm length `arm` (a)
/// + Upper hoop height `upper`
/// + Lower hoop height `lower`
/// + Folded angle bound `folded`
/// + Deployed angle bound `deployed`
///
/// The solver trusts the parameters. Call [`HoopTruss::check()`] to find the
/// violated preconditions before rendering.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
#[derive(Clone, Debug, PartialEq)]
pub struct HoopTruss {
    /// Number of scissor units
    pub unit: usize,
    /// Length of the scissor arm
    pub arm: f64,
    /// Height of the upper hoop plane
    pub upper: f64,
    /// Height of the lower hoop plane
    pub lower: f64,
    /// Folding angle of the folded state
    pub folded: f64,
    /// Folding angle of the deployed state
    pub deployed: f64,
}

impl Default for HoopTruss {
    fn default() -> Self {
        Self::example()
    }
}

impl HoopTruss {
    /// An example of a twelve units hoop.
    pub fn example() -> Self {
        Self {
            unit: 12,
            arm: 282.84,
            upper: 200.,
            lower: 0.,
            folded: PI / 12.,
            deployed: FRAC_PI_2,
        }
    }

    /// Folding angle bounds, `[folded, deployed]`.
    pub const fn angle_bound(&self) -> [f64; 2] {
        [self.folded, self.deployed]
    }

    /// Hoop radius at the folded and the deployed bounds.
    pub fn radius_bound(&self) -> [f64; 2] {
        self.angle_bound().map(|phi| self.radius(phi))
    }

    /// Chord length spanned by a pair of scissor arms.
    pub fn chord(&self, phi: f64) -> f64 {
        2. * self.arm * phi.sin()
    }

    /// Hoop radius derived from the chord length.
    pub fn radius(&self, phi: f64) -> f64 {
        self.chord(phi) / (2. * (PI / self.unit as f64).sin())
    }

    /// Check the preconditions of the parameters.
    pub fn check(&self) -> Result<(), crate::Error> {
        let Self { unit, arm, upper, lower, folded, deployed } = *self;
        let err = |msg| Err(crate::Error::Param(msg));
        if unit < 3 {
            err(format!("unit count must be at least 3, got {unit}"))
        } else if arm.is_nan() || arm <= 0. {
            err(format!("arm length must be positive, got {arm}"))
        } else if upper.is_nan() || lower.is_nan() || upper <= lower {
            err(format!("upper height {upper} must be above lower height {lower}"))
        } else if !(0. < folded && folded < deployed && deployed <= FRAC_PI_2) {
            err(format!(
                "angle bounds must satisfy 0 < {folded} < {deployed} <= {FRAC_PI_2}"
            ))
        } else {
            Ok(())
        }
    }

    /// Solve the node layout at the folding angle `phi`.
    ///
    /// Center joint `i` is the midpoint of node `i` and node `i + 1`, moved
    /// toward the origin until both scissor arms have the length `arm`.
    /// The solver is total: degenerate geometry is clamped instead of failing.
    ///
    /// ```
    /// use hoop_truss::HoopTruss;
    /// let hoop = HoopTruss::example();
    /// let state = hoop.solve(std::f64::consts::FRAC_PI_2);
    /// assert_eq!(state.upper.len(), 12);
    /// assert!((state.chord - 565.68).abs() < 1e-9);
    /// ```
    pub fn solve(&self, phi: f64) -> FoldingState {
        let n = self.unit;
        let chord = self.chord(phi);
        let radius = self.radius(phi);
        let ring = |z| {
            (0..n)
                .map(|i| {
                    let theta = TAU * i as f64 / n as f64;
                    [radius * theta.cos(), radius * theta.sin(), z]
                })
                .collect::<Vec<_>>()
        };
        let upper = ring(self.upper);
        let lower = ring(self.lower);
        let offset = (self.arm * self.arm - chord * chord * 0.25).max(0.).sqrt();
        let upper_joints = center_joints(&upper, offset);
        let lower_joints = center_joints(&lower, offset);
        FoldingState {
            phi,
            chord,
            radius,
            upper,
            lower,
            upper_joints,
            lower_joints,
        }
    }
}

// Midpoints of the adjacent nodes, pulled toward the origin
fn center_joints(nodes: &[[f64; 3]], offset: f64) -> Vec<[f64; 3]> {
    let n = nodes.len();
    (0..n)
        .map(|i| {
            let p1 = na::Point3::from(nodes[i]);
            let p2 = na::Point3::from(nodes[(i + 1) % n]);
            let mid = na::center(&p1, &p2);
            let dir = mid.coords / mid.coords.norm().max(RADIAL_EPS);
            (mid - offset * dir).into()
        })
        .collect()
}
