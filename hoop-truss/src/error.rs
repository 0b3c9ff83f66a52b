/// Error of the configuration surface.
///
/// The solver never raises errors, degenerate geometry is clamped instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unrecognized generation mode
    Mode(String),
    /// Mechanism parameters violate a precondition
    Param(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Mode(s) => write!(f, "invalid mode {s:?}, expected \"static\" or \"animation\""),
            Self::Param(s) => write!(f, "invalid parameter: {s}"),
        }
    }
}

impl std::error::Error for Error {}
