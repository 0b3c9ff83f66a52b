use nalgebra as na;

/// Node layout of a hoop truss at one folding angle.
///
/// Produced by [`HoopTruss::solve()`](crate::HoopTruss::solve). All node lists
/// have the unit count as their length and share the same index order, node
/// `i` and node `(i + 1) % n` are the neighbours of center joint `i`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FoldingState {
    /// Folding angle
    pub phi: f64,
    /// Chord length between the adjacent hoop nodes
    pub chord: f64,
    /// Hoop radius
    pub radius: f64,
    /// Upper hoop nodes
    pub upper: Vec<[f64; 3]>,
    /// Lower hoop nodes
    pub lower: Vec<[f64; 3]>,
    /// Center joints of the upper scissor arms
    pub upper_joints: Vec<[f64; 3]>,
    /// Center joints of the lower scissor arms
    pub lower_joints: Vec<[f64; 3]>,
}

/// Member type of the truss.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarKind {
    /// Edge of the upper hoop
    UpperHoop,
    /// Edge of the lower hoop
    LowerHoop,
    /// Scissor arm, from a hoop node to a center joint
    Arm,
    /// Vertical between the upper and lower nodes
    Vertical,
    /// Diagonal brace from an upper node to a lower center joint
    Brace,
}

impl BarKind {
    /// All member types in drawing order.
    pub const LIST: [Self; 5] = [
        Self::LowerHoop,
        Self::UpperHoop,
        Self::Vertical,
        Self::Brace,
        Self::Arm,
    ];

    /// Get the member names.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpperHoop => "Upper Hoop",
            Self::LowerHoop => "Lower Hoop",
            Self::Arm => "Scissor Arm",
            Self::Vertical => "Vertical",
            Self::Brace => "Diagonal Brace",
        }
    }
}

/// A straight member of the truss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    /// Member type
    pub kind: BarKind,
    /// Two end points
    pub ends: [[f64; 3]; 2],
}

impl Bar {
    /// Length of the member.
    pub fn length(&self) -> f64 {
        let [p1, p2] = self.ends.map(na::Point3::from);
        na::distance(&p1, &p2)
    }
}

impl FoldingState {
    /// Number of the scissor units.
    pub fn unit(&self) -> usize {
        self.upper.len()
    }

    /// Folding angle in degrees.
    pub fn degrees(&self) -> f64 {
        self.phi.to_degrees()
    }

    /// The textual angle label, rounded to one decimal place.
    ///
    /// ```
    /// use hoop_truss::HoopTruss;
    /// let state = HoopTruss::example().solve(std::f64::consts::FRAC_PI_4);
    /// assert_eq!(state.label(), "φ = 45.0°");
    /// ```
    pub fn label(&self) -> String {
        format!("φ = {:.1}°", self.degrees())
    }

    /// Plot framing of this state, `[x, y, z]` ranges.
    ///
    /// The x and y ranges are 1.5 times the hoop radius, the z range spans the
    /// hoop planes and the center joints.
    pub fn frame_bound(&self) -> [[f64; 2]; 3] {
        let r = self.radius * 1.5;
        let z = self
            .nodes()
            .map(|(_, _, p)| p)
            .fold([f64::INFINITY, -f64::INFINITY], |[min, max], p| {
                [min.min(p[2]), max.max(p[2])]
            });
        [[-r, r], [-r, r], z]
    }

    /// Iterate over all nodes with their type name and index.
    pub fn nodes(&self) -> impl Iterator<Item = (&'static str, usize, [f64; 3])> + '_ {
        fn tagged<'a>(
            name: &'static str,
            nodes: &'a [[f64; 3]],
        ) -> impl Iterator<Item = (&'static str, usize, [f64; 3])> + 'a {
            nodes.iter().enumerate().map(move |(i, &p)| (name, i, p))
        }
        tagged("upper", &self.upper)
            .chain(tagged("lower", &self.lower))
            .chain(tagged("upper_joint", &self.upper_joints))
            .chain(tagged("lower_joint", &self.lower_joints))
    }

    /// List all members of the truss.
    ///
    /// + Hoop edges connect node `i` and `i + 1` on each plane.
    /// + Scissor arms connect node `i`, joint `i` and node `i + 1` on each
    ///   plane.
    /// + Verticals connect the upper and lower node `i`.
    /// + Braces connect upper node `i` and the lower joint two positions back.
    pub fn bars(&self) -> Vec<Bar> {
        let n = self.unit();
        let mut bars = Vec::with_capacity(n * 8);
        let bar = |kind, p1, p2| Bar { kind, ends: [p1, p2] };
        for i in 0..n {
            let next = (i + 1) % n;
            let back = (i + 2 * n - 2) % n;
            bars.push(bar(BarKind::UpperHoop, self.upper[i], self.upper[next]));
            bars.push(bar(BarKind::LowerHoop, self.lower[i], self.lower[next]));
            for (nodes, joints) in [
                (&self.upper, &self.upper_joints),
                (&self.lower, &self.lower_joints),
            ] {
                bars.push(bar(BarKind::Arm, nodes[i], joints[i]));
                bars.push(bar(BarKind::Arm, joints[i], nodes[next]));
            }
            bars.push(bar(BarKind::Vertical, self.upper[i], self.lower[i]));
            bars.push(bar(BarKind::Brace, self.upper[i], self.lower_joints[back]));
        }
        bars
    }

    /// The largest deviation between the scissor arm members and `arm`.
    ///
    /// Zero in exact arithmetic for every folding angle in `(0, π/2]`.
    pub fn arm_residual(&self, arm: f64) -> f64 {
        self.bars()
            .into_iter()
            .filter(|bar| bar.kind == BarKind::Arm)
            .map(|bar| (bar.length() - arm).abs())
            .fold(0., f64::max)
    }
}
