//! Equations of state for gas in a rigid cylinder.
//!
//! Both models answer the same two questions for a cylinder of known internal
//! volume at a known temperature:
//!
//! - how much gas (as a volume at one atmosphere) is in it at a given pressure,
//! - what pressure a given amount of gas produces.
//!
//! [`ideal`] is linear in pressure and ignores composition.
//! [`van_der_waals`] accounts for molecular attraction and size, which matters
//! at fill pressures, especially for helium-rich mixtures.

pub mod ideal;
pub mod van_der_waals;

pub use van_der_waals::VanDerWaals;

/// Which equation of state a [`GasSupply`](super::GasSupply) uses.
///
/// The same physical cylinder may be modeled either way, so the law is chosen
/// per supply rather than stored on the cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GasLaw {
    Ideal,
    #[default]
    VanDerWaals,
}
