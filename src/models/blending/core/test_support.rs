use std::sync::Arc;

use crate::support::{
    gas::{Cylinder, GasLaw, GasSupply, Mixture},
    units::UnitSystem,
};

/// An aluminum 80: 80 ft³ of air at 3000 psi.
pub(super) fn al80() -> Arc<Cylinder> {
    Arc::new(Cylinder::from_capacity(UnitSystem::Imperial, 80.0, 3000.0).unwrap())
}

/// A 12 L steel cylinder rated for 232 bar.
pub(super) fn twelve_liter() -> Arc<Cylinder> {
    Arc::new(Cylinder::new(UnitSystem::Metric, 12.0, 232.0).unwrap())
}

pub(super) fn supply(
    cylinder: &Arc<Cylinder>,
    mixture: Mixture,
    pressure: f64,
    gas_law: GasLaw,
) -> GasSupply {
    let units = cylinder.units();
    GasSupply::new(
        Arc::clone(cylinder),
        mixture,
        pressure,
        gas_law,
        units.standard_temperature(),
    )
}

pub(super) fn ean(percent: f64) -> Mixture {
    Mixture::from_percent(percent, 0.0).unwrap()
}

pub(super) fn trimix(o2: f64, he: f64) -> Mixture {
    Mixture::from_percent(o2, he).unwrap()
}
