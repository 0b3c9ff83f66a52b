//! Hoop truss deployment kinematics.
//!
//! A hoop truss is a ring of scissor-like (7R) units. A single folding angle
//! `phi` drives the whole mechanism from the folded state to the deployed
//! state, the scissor arms keep their length and the hoop radius follows the
//! chord length.
//!
//! ```
//! use hoop_truss::{Deploy, HoopTruss, Mode};
//!
//! let hoop = HoopTruss::example();
//! let deploy = Deploy { mode: "animation".parse::<Mode>().unwrap(), ..Deploy::new() };
//! let states = deploy.run(&hoop);
//! assert_eq!(states.len(), 50);
//! assert!(states.windows(2).all(|w| w[0].radius < w[1].radius));
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::{error::*, mech::*, mode::*, seq::*};

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
mod error;
pub mod mech;
mod mode;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
pub mod seq;
#[cfg(test)]
mod tests;
