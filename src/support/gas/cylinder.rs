use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    units::UnitSystem,
};

use super::{
    GasLaw, Mixture, PlannerError, SolverConfig,
    eos::{ideal, van_der_waals},
};

/// A rigid gas cylinder: internal (water) volume and service pressure.
///
/// Values are expressed in the cylinder's [`UnitSystem`].
/// The gas law is supplied per call, since the same cylinder may be modeled
/// both ideally and as a real gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    units: UnitSystem,
    internal_volume: Constrained<f64, StrictlyPositive>,
    service_pressure: Constrained<f64, StrictlyPositive>,
}

impl Cylinder {
    /// Creates a cylinder from its internal volume and service pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] unless both values are
    /// strictly positive.
    pub fn new(
        units: UnitSystem,
        internal_volume: f64,
        service_pressure: f64,
    ) -> Result<Self, PlannerError> {
        Ok(Self {
            units,
            internal_volume: positive("internal volume", internal_volume)?,
            service_pressure: positive("service pressure", service_pressure)?,
        })
    }

    /// Creates a cylinder from its rated capacity at service pressure.
    ///
    /// The internal volume is derived with the ideal gas law, the way
    /// manufacturers rate cylinders.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] unless both values are
    /// strictly positive.
    pub fn from_capacity(
        units: UnitSystem,
        capacity: f64,
        service_pressure: f64,
    ) -> Result<Self, PlannerError> {
        let capacity = positive("capacity", capacity)?.into_inner();
        let service = positive("service pressure", service_pressure)?.into_inner();

        let internal_volume = capacity * units.atm_pressure() / service;
        Self::new(units, internal_volume, service)
    }

    #[must_use]
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    #[must_use]
    pub fn internal_volume(&self) -> f64 {
        self.internal_volume.into_inner()
    }

    #[must_use]
    pub fn service_pressure(&self) -> f64 {
        self.service_pressure.into_inner()
    }

    /// Replaces the internal volume after a host-side edit.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] unless the volume is strictly positive.
    pub fn set_internal_volume(&mut self, internal_volume: f64) -> Result<(), PlannerError> {
        self.internal_volume = positive("internal volume", internal_volume)?;
        Ok(())
    }

    /// Replaces the service pressure after a host-side edit.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] unless the pressure is strictly positive.
    pub fn set_service_pressure(&mut self, service_pressure: f64) -> Result<(), PlannerError> {
        self.service_pressure = positive("service pressure", service_pressure)?;
        Ok(())
    }

    /// Gas amount held at `pressure`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] for a negative pressure and
    /// [`PlannerError::NoConvergence`] if the real-gas solve fails.
    pub fn capacity_at(
        &self,
        pressure: f64,
        mixture: &Mixture,
        gas_law: GasLaw,
        temperature: ThermodynamicTemperature,
        config: &SolverConfig,
    ) -> Result<f64, PlannerError> {
        if !(pressure >= 0.0) {
            return Err(PlannerError::precondition(format!(
                "pressure must not be negative, got {pressure}"
            )));
        }

        let volume = self.units.volume(self.internal_volume());
        let pressure = self.units.pressure(pressure);

        let amount = match gas_law {
            GasLaw::Ideal => ideal::amount_at_pressure(volume, pressure),
            GasLaw::VanDerWaals => van_der_waals::gas_amount_at_pressure(
                volume,
                pressure,
                mixture,
                temperature,
                self.units.capacity(config.amount_tol),
                config.max_newton_iters,
            )?,
        };

        Ok(self.units.capacity_value(amount))
    }

    /// Pressure produced by `amount` of gas.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] for a negative amount.
    pub fn pressure_at(
        &self,
        amount: f64,
        mixture: &Mixture,
        gas_law: GasLaw,
        temperature: ThermodynamicTemperature,
    ) -> Result<f64, PlannerError> {
        if !(amount >= 0.0) {
            return Err(PlannerError::precondition(format!(
                "gas amount must not be negative, got {amount}"
            )));
        }

        let volume = self.units.volume(self.internal_volume());
        let amount = self.units.capacity(amount);

        let pressure = match gas_law {
            GasLaw::Ideal => ideal::pressure_at_amount(volume, amount),
            GasLaw::VanDerWaals => {
                van_der_waals::pressure_at_gas_amount(volume, amount, mixture, temperature)
            }
        };

        Ok(self.units.pressure_value(pressure))
    }

    /// Amount of air the cylinder holds at its service pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::NoConvergence`] if the real-gas solve fails.
    pub fn service_capacity(
        &self,
        gas_law: GasLaw,
        temperature: ThermodynamicTemperature,
        config: &SolverConfig,
    ) -> Result<f64, PlannerError> {
        self.capacity_at(
            self.service_pressure(),
            &Mixture::air(),
            gas_law,
            temperature,
            config,
        )
    }
}

fn positive(what: &str, value: f64) -> Result<Constrained<f64, StrictlyPositive>, PlannerError> {
    StrictlyPositive::new(value)
        .map_err(|err| PlannerError::precondition(format!("{what} {value}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn room() -> ThermodynamicTemperature {
        UnitSystem::Metric.standard_temperature()
    }

    #[test]
    fn rejects_non_positive_geometry() {
        assert!(matches!(
            Cylinder::new(UnitSystem::Metric, 0.0, 200.0),
            Err(PlannerError::CallerPrecondition { .. })
        ));
        assert!(Cylinder::new(UnitSystem::Metric, 12.0, -1.0).is_err());

        let mut cylinder = Cylinder::new(UnitSystem::Metric, 12.0, 232.0).unwrap();
        assert!(cylinder.set_internal_volume(f64::NAN).is_err());
        cylinder.set_service_pressure(300.0).unwrap();
        assert_relative_eq!(cylinder.service_pressure(), 300.0);
    }

    #[test]
    fn aluminum_eighty_from_capacity() {
        let al80 = Cylinder::from_capacity(UnitSystem::Imperial, 77.4, 3000.0).unwrap();

        // 77.4 ft³ of gas at 3000 psi fits in about 0.379 ft³ of water volume.
        assert_relative_eq!(al80.internal_volume(), 0.3792, epsilon = 1e-4);

        let capacity = al80
            .service_capacity(GasLaw::Ideal, room(), &SolverConfig::default())
            .unwrap();
        assert_relative_eq!(capacity, 77.4, max_relative = 1e-12);
    }

    #[test]
    fn ideal_dispatch_is_linear() {
        let cylinder = Cylinder::new(UnitSystem::Metric, 10.0, 200.0).unwrap();
        let config = SolverConfig::default();

        let full = cylinder
            .capacity_at(200.0, &Mixture::air(), GasLaw::Ideal, room(), &config)
            .unwrap();
        let half = cylinder
            .capacity_at(100.0, &Mixture::air(), GasLaw::Ideal, room(), &config)
            .unwrap();
        assert_relative_eq!(full, 2.0 * half, max_relative = 1e-12);
    }

    #[test]
    fn real_gas_dispatch_roundtrips() {
        let cylinder = Cylinder::new(UnitSystem::Metric, 12.0, 232.0).unwrap();
        let tx = Mixture::new(0.18, 0.45).unwrap();
        let config = SolverConfig::default();

        let amount = cylinder
            .capacity_at(232.0, &tx, GasLaw::VanDerWaals, room(), &config)
            .unwrap();
        let pressure = cylinder
            .pressure_at(amount, &tx, GasLaw::VanDerWaals, room())
            .unwrap();

        assert_relative_eq!(pressure, 232.0, epsilon = 0.1);
    }

    #[test]
    fn negative_inputs_are_caller_errors() {
        let cylinder = Cylinder::new(UnitSystem::Metric, 12.0, 232.0).unwrap();
        let config = SolverConfig::default();

        assert!(matches!(
            cylinder.capacity_at(-1.0, &Mixture::air(), GasLaw::Ideal, room(), &config),
            Err(PlannerError::CallerPrecondition { .. })
        ));
        assert!(matches!(
            cylinder.pressure_at(-1.0, &Mixture::air(), GasLaw::Ideal, room()),
            Err(PlannerError::CallerPrecondition { .. })
        ));
    }
}
