//! The functions used to plot the folding states.
//!
//! # Single Plot Example
//!
//! ```
//! use hoop_truss::{plot::*, HoopTruss};
//!
//! let state = HoopTruss::example().solve(std::f64::consts::FRAC_PI_4);
//! let mut buf = String::new();
//! let svg = SVGBackend::with_string(&mut buf, (800, 800));
//! Figure::new(&state).label(true).plot(svg).unwrap();
//! ```
//!
//! # Static Panels Example
//!
//! ```
//! use hoop_truss::{plot::*, HoopTruss};
//!
//! let states = HoopTruss::example().deployment(3);
//! let mut buf = String::new();
//! let svg = SVGBackend::with_string(&mut buf, (2400, 800));
//! snapshots(svg, &states, Opt::default()).unwrap();
//! ```
pub use self::anim::*;
use crate::{BarKind, FoldingState};
use fmtastic::Subscript;
#[doc(no_inline)]
pub use plotters::{prelude::*, *};
use std::ops::Range;

mod anim;

pub(crate) type PResult<T, B> = Result<T, DrawingAreaErrorKind<<B as DrawingBackend>::ErrorType>>;
pub(crate) type Canvas<B> = DrawingArea<B, coord::Shift>;

const LIGHTGRAY: RGBColor = RGBColor(0xd8, 0xd8, 0xd8);
/// Font family of the text elements.
pub const FONT_FAMILY: &str = "DejaVu Sans";

macro_rules! inner_opt {
    ($($(#[$meta:meta])+ fn $name:ident($ty:ty))+) => {$(
        $(#[$meta])+
        pub fn $name(mut self, $name: $ty) -> Self {
            self.opt.$name = $name;
            self
        }
    )+};
}

/// Plot option.
#[derive(Clone, PartialEq, Debug)]
pub struct Opt {
    /// Stroke size
    pub stroke: u32,
    /// Font size
    pub font: f64,
    /// Show grid
    pub grid: bool,
    /// Show axis
    pub axis: bool,
    /// Overlay the angle label
    pub label: bool,
    /// Show the member legend
    pub legend: bool,
    /// Show the node names
    pub node_name: bool,
}

impl Default for Opt {
    fn default() -> Self {
        Self {
            stroke: 2,
            font: 24.,
            grid: false,
            axis: true,
            label: true,
            legend: false,
            node_name: false,
        }
    }
}

impl Opt {
    /// Option of the raster frames, without axis or legend.
    ///
    /// The angle label is kept when the `font` feature provides a font
    /// engine, otherwise the frames have no text.
    pub fn raster() -> Self {
        Self {
            axis: false,
            label: cfg!(feature = "font"),
            legend: false,
            node_name: false,
            ..Self::default()
        }
    }
}

/// Drawing option of a folding state.
#[derive(Clone)]
pub struct Figure<'a> {
    state: &'a FoldingState,
    bound: Option<[[f64; 2]; 3]>,
    pub(crate) opt: Opt,
}

impl<'a> From<&'a FoldingState> for Figure<'a> {
    fn from(state: &'a FoldingState) -> Self {
        Self::new(state)
    }
}

impl<'a> Figure<'a> {
    /// Create a figure of the folding state.
    pub fn new(state: &'a FoldingState) -> Self {
        Self { state, bound: None, opt: Opt::default() }
    }

    /// Set the inner options.
    pub fn with_opt(self, opt: Opt) -> Self {
        Self { opt, ..self }
    }

    /// Fix the plot area, `[x, y, z]` ranges.
    ///
    /// Default to [`FoldingState::frame_bound()`].
    pub fn bound(self, bound: impl Into<Option<[[f64; 2]; 3]>>) -> Self {
        Self { bound: bound.into(), ..self }
    }

    inner_opt! {
        /// Set the line stroke of the members.
        fn stroke(u32)
        /// Set font size.
        fn font(f64)
        /// Use grid in the plot.
        fn grid(bool)
        /// Show the axis.
        fn axis(bool)
        /// Overlay the angle label.
        fn label(bool)
        /// Show the member legend.
        fn legend(bool)
        /// Show the node names.
        fn node_name(bool)
    }

    fn get_font(&self) -> TextStyle {
        (FONT_FAMILY, self.opt.font).into_font().color(&BLACK)
    }

    /// Plot the truss.
    ///
    /// The hoop axis is drawn vertically.
    pub fn plot<B, R>(&self, root: R) -> PResult<(), B>
    where
        B: DrawingBackend,
        Canvas<B>: From<R>,
    {
        #[cfg(feature = "font")]
        register_font();
        let root = Canvas::from(root);
        root.fill(&WHITE)?;
        let Opt { stroke, grid, axis, label, legend, node_name, .. } = self.opt;
        let dot_size = stroke + 2;
        let [x_spec, y_spec, z_spec] = self.bound.unwrap_or_else(|| self.state.frame_bound()).map(widen);
        let mut chart = ChartBuilder::on(&root);
        if axis {
            chart
                .set_label_area_size(LabelAreaPosition::Left, (8).percent())
                .set_label_area_size(LabelAreaPosition::Bottom, (4).percent());
        }
        // Height is the vertical axis of the projection
        let mut chart = chart
            .margin((4).percent())
            .build_cartesian_3d(x_spec, z_spec, y_spec)?;
        chart.with_projection(|mut pb| {
            pb.yaw = 30f64.to_radians();
            pb.pitch = 20f64.to_radians();
            pb.scale = 0.9;
            pb.into_matrix()
        });
        if axis {
            let mut axes = chart.configure_axes();
            if !grid {
                axes.max_light_lines(0);
            }
            axes.light_grid_style(LIGHTGRAY)
                .label_style(self.get_font())
                .axis_panel_style(TRANSPARENT)
                .x_labels(4)
                .y_labels(3)
                .z_labels(4)
                .x_formatter(&formatter)
                .y_formatter(&formatter)
                .z_formatter(&formatter)
                .draw()?;
        }
        // Draw members
        let bars = self.state.bars();
        for kind in BarKind::LIST {
            let color = bar_style(kind).stroke_width(stroke);
            let series = bars
                .iter()
                .filter(|bar| bar.kind == kind)
                .map(|bar| PathElement::new(bar.ends.map(to_coord), color));
            let anno = chart.draw_series(series)?;
            if legend {
                anno.label(kind.name())
                    .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color));
            }
        }
        // Draw nodes and joints
        let nodes = self.state.upper.iter().chain(&self.state.lower);
        chart.draw_series(nodes.map(|&p| Circle::new(to_coord(p), dot_size, BLACK.filled())))?;
        let joints = self.state.upper_joints.iter().chain(&self.state.lower_joints);
        chart.draw_series(joints.map(|&p| Circle::new(to_coord(p), dot_size, BLACK)))?;
        if node_name {
            let t_style = self.get_font().color(&BLUE);
            let names = [("U", &self.state.upper), ("L", &self.state.lower)]
                .into_iter()
                .flat_map(|(sym, nodes)| nodes.iter().enumerate().map(move |(i, &p)| (sym, i, p)))
                .map(|(sym, i, p)| {
                    EmptyElement::at(to_coord(p))
                        + Text::new(format!("{sym}{}", Subscript(i + 1)), (5, 5), t_style.clone())
                });
            chart.draw_series(names)?;
        }
        if legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE)
                .border_style(BLACK)
                .label_font(self.get_font())
                .draw()?;
        }
        if label {
            root.draw_text(&self.state.label(), &self.get_font(), (10, 10))?;
        }
        Ok(())
    }
}

/// Plot the folding states side by side, each in its own labeled panel.
///
/// All panels share the plot area of the widest state.
pub fn snapshots<B, R>(root: R, states: &[FoldingState], opt: Opt) -> PResult<(), B>
where
    B: DrawingBackend,
    Canvas<B>: From<R>,
{
    let root = Canvas::from(root);
    root.fill(&WHITE)?;
    let bound = common_bound(states);
    let panels = root.split_evenly((1, states.len().max(1)));
    for (panel, state) in panels.into_iter().zip(states) {
        Figure::new(state)
            .with_opt(opt.clone())
            .bound(bound)
            .plot::<B, Canvas<B>>(panel)?;
    }
    root.present()
}

/// The plot area that covers all of the folding states.
pub fn common_bound(states: &[FoldingState]) -> Option<[[f64; 2]; 3]> {
    states.iter().map(FoldingState::frame_bound).reduce(|a, b| {
        std::array::from_fn(|i| [a[i][0].min(b[i][0]), a[i][1].max(b[i][1])])
    })
}

#[cfg(feature = "font")]
fn register_font() {
    const FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        // The bundled face always parses
        let _ = plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT);
    });
}

fn bar_style(kind: BarKind) -> RGBColor {
    match kind {
        BarKind::UpperHoop => BLUE,
        BarKind::LowerHoop => RED,
        BarKind::Arm => BLACK,
        BarKind::Vertical => plotters::style::full_palette::GREEN_800,
        BarKind::Brace => plotters::style::full_palette::ORANGE,
    }
}

// Swap the height into the vertical axis
fn to_coord([x, y, z]: [f64; 3]) -> (f64, f64, f64) {
    (x, z, y)
}

// Avoid an empty range when the hoop is collapsed
fn widen([min, max]: [f64; 2]) -> Range<f64> {
    if max - min > f64::EPSILON {
        min..max
    } else {
        min - 1.0..max + 1.0
    }
}

fn formatter(v: &f64) -> String {
    format!("{v:.0}")
}
