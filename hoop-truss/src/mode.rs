//! Generation modes and the deployment configuration.
use crate::{Error, FoldingState, HoopTruss};

/// Generation mode of the deployment sequence.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
pub enum Mode {
    /// Discrete snapshots, each state in its own panel
    #[default]
    Static,
    /// Continuous sequence, each state is a frame of an animation
    Anim,
}

impl Mode {
    /// Get the lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Anim => "animation",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "animation" => Ok(Self::Anim),
            _ => Err(Error::Mode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

/// Deployment configuration, the mode and its sample counts.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deploy {
    /// Generation mode, "static" or "animation"
    #[cfg_attr(feature = "clap", clap(default_value_t = Mode::Static))]
    pub mode: Mode,
    /// Number of the snapshots in static mode
    #[cfg_attr(feature = "clap", clap(long, default_value_t = Deploy::new().states))]
    pub states: usize,
    /// Number of the frames in animation mode
    #[cfg_attr(feature = "clap", clap(long, default_value_t = Deploy::new().frames))]
    pub frames: usize,
}

impl Default for Deploy {
    fn default() -> Self {
        Self::new()
    }
}

impl Deploy {
    /// Create a static deployment with the default counts.
    pub const fn new() -> Self {
        Self { mode: Mode::Static, states: 3, frames: 50 }
    }

    /// Create from a mode string.
    ///
    /// The mode is validated here, before any geometry is computed.
    ///
    /// ```
    /// use hoop_truss::{Deploy, Error};
    /// assert!(Deploy::from_mode("animation").is_ok());
    /// assert_eq!(Deploy::from_mode("foo"), Err(Error::Mode("foo".to_string())));
    /// ```
    pub fn from_mode(mode: &str) -> Result<Self, Error> {
        Ok(Self { mode: mode.parse()?, ..Self::new() })
    }

    /// Number of the states of the selected mode.
    pub const fn count(&self) -> usize {
        match self.mode {
            Mode::Static => self.states,
            Mode::Anim => self.frames,
        }
    }

    /// Generate the sequence in the angle bounds of the mechanism.
    pub fn run(&self, hoop: &HoopTruss) -> Vec<FoldingState> {
        hoop.deployment(self.count())
    }

    /// Parallel version of [`Deploy::run()`].
    #[cfg(feature = "rayon")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "rayon")))]
    pub fn par_run(&self, hoop: &HoopTruss) -> Vec<FoldingState> {
        let [start, end] = hoop.angle_bound();
        crate::par_sequence(hoop, start, end, self.count())
    }
}
