//! Breathing gases, cylinders, and the gas a cylinder holds.
//!
//! The building blocks of a blend:
//!
//! - [`Mixture`]: an O2/He/N2 composition.
//! - [`eos`]: equations of state relating cylinder pressure to gas amount,
//!   both ideal and Van der Waals.
//! - [`Cylinder`]: the physical container (internal volume and service pressure).
//! - [`GasSupply`]: what is in a cylinder right now, with the operations a
//!   blender performs on it (drain, add gas, top up).
//!
//! Pressures and amounts crossing this API are plain `f64` values in the
//! cylinder's [`UnitSystem`](crate::support::units::UnitSystem).
//! A gas *amount* is the volume the gas would occupy at one atmosphere.

mod config;
mod cylinder;
mod error;
mod mixture;
mod supply;

pub mod eos;

pub use config::SolverConfig;
pub use cylinder::Cylinder;
pub use eos::GasLaw;
pub use error::{InvalidMixture, PlannerError, Solver};
pub use mixture::{Mixture, MixtureKind};
pub use supply::GasSupply;

pub(crate) use supply::round_off_slack;
