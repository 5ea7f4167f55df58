//! Supporting utilities used by models.
//!
//! - [`constraint`]: type-level numeric invariants.
//! - [`units`]: imperial and metric unit systems.
//! - [`gas`]: mixtures, cylinders, and the gas they hold.
//! - [`dive`]: depth limits and best-mix selection.

pub mod constraint;
pub mod dive;
pub mod gas;
pub mod units;
