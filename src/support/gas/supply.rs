mod topup;

use std::sync::Arc;

use uom::si::f64::ThermodynamicTemperature;

use crate::support::units::UnitSystem;

use super::{Cylinder, GasLaw, Mixture, PlannerError, SolverConfig};

/// The gas currently held by a cylinder.
///
/// A supply pairs a shared [`Cylinder`] with a mixture and a pressure, and
/// exposes the operations a blender performs: draining, adding gas, and
/// topping up to a pressure.
///
/// Cloning a supply copies its mixture, pressure, and settings while the
/// cylinder stays shared, so a planner can simulate a fill on a clone
/// without touching the original.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use gas_blend_models::support::gas::{Cylinder, GasLaw, GasSupply, Mixture};
/// use gas_blend_models::support::units::UnitSystem;
///
/// let units = UnitSystem::Metric;
/// let cylinder = Arc::new(Cylinder::new(units, 12.0, 232.0).unwrap());
/// let mut supply = GasSupply::new(
///     cylinder,
///     Mixture::air(),
///     50.0,
///     GasLaw::Ideal,
///     units.standard_temperature(),
/// );
///
/// supply.add_o2(300.0).unwrap().topup(&Mixture::air(), 200.0).unwrap();
/// assert!((supply.pressure() - 200.0).abs() < 1e-9);
/// assert!(supply.mixture().f_o2() > 0.21);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GasSupply {
    cylinder: Arc<Cylinder>,
    mixture: Mixture,
    pressure: f64,
    gas_law: GasLaw,
    temperature: ThermodynamicTemperature,
    config: SolverConfig,
}

impl GasSupply {
    /// Creates a supply holding `mixture` at `pressure` (in the cylinder's units).
    #[must_use]
    pub fn new(
        cylinder: Arc<Cylinder>,
        mixture: Mixture,
        pressure: f64,
        gas_law: GasLaw,
        temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            cylinder,
            mixture,
            pressure,
            gas_law,
            temperature,
            config: SolverConfig::default(),
        }
    }

    /// Returns this supply with different solver limits.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn cylinder(&self) -> &Arc<Cylinder> {
        &self.cylinder
    }

    #[must_use]
    pub fn mixture(&self) -> &Mixture {
        &self.mixture
    }

    #[must_use]
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    #[must_use]
    pub fn gas_law(&self) -> GasLaw {
        self.gas_law
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn units(&self) -> UnitSystem {
        self.cylinder.units()
    }

    /// Amount of gas in the cylinder, as a volume at one atmosphere.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::NoConvergence`] if the real-gas solve fails.
    pub fn gas_amount(&self) -> Result<f64, PlannerError> {
        self.capacity_at(self.pressure, &self.mixture)
    }

    /// The amount held, rounded down to a whole unit for display.
    ///
    /// # Errors
    ///
    /// Same as [`GasSupply::gas_amount`].
    pub fn whole_gas_amount(&self) -> Result<f64, PlannerError> {
        Ok(self.gas_amount()?.floor())
    }

    /// Releases gas until `target` remains. The mixture is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] unless
    /// `0 ≤ target ≤ gas_amount()`.
    pub fn drain_to_gas_amount(&mut self, target: f64) -> Result<&mut Self, PlannerError> {
        let current = self.gas_amount()?;
        let slack = round_off_slack(current);

        if target.is_nan() || target < -slack || target > current + slack {
            return Err(PlannerError::precondition(format!(
                "cannot drain to {target}: cylinder holds {current}"
            )));
        }

        self.pressure = self.pressure_at(target.clamp(0.0, current), &self.mixture)?;
        Ok(self)
    }

    /// Adds `amount` of `mixture`, blending it with what is already there.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] for a negative or
    /// non-finite amount and [`PlannerError::NoConvergence`] if the real-gas
    /// solve fails.
    pub fn add_gas(&mut self, mixture: &Mixture, amount: f64) -> Result<&mut Self, PlannerError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PlannerError::precondition(format!(
                "gas amount must be finite and non-negative, got {amount}"
            )));
        }
        if amount == 0.0 {
            return Ok(self);
        }

        let current = self.gas_amount()?;
        self.mixture = self.mixture.blend(current, mixture, amount);
        self.pressure = self.pressure_at(current + amount, &self.mixture)?;
        Ok(self)
    }

    /// Adds `amount` of pure oxygen.
    ///
    /// # Errors
    ///
    /// Same as [`GasSupply::add_gas`].
    pub fn add_o2(&mut self, amount: f64) -> Result<&mut Self, PlannerError> {
        self.add_gas(&Mixture::oxygen(), amount)
    }

    /// Adds `amount` of pure helium.
    ///
    /// # Errors
    ///
    /// Same as [`GasSupply::add_gas`].
    pub fn add_he(&mut self, amount: f64) -> Result<&mut Self, PlannerError> {
        self.add_gas(&Mixture::helium(), amount)
    }

    fn capacity_at(&self, pressure: f64, mixture: &Mixture) -> Result<f64, PlannerError> {
        self.cylinder
            .capacity_at(pressure, mixture, self.gas_law, self.temperature, &self.config)
    }

    fn pressure_at(&self, amount: f64, mixture: &Mixture) -> Result<f64, PlannerError> {
        self.cylinder
            .pressure_at(amount, mixture, self.gas_law, self.temperature)
    }
}

/// Absolute slack for comparing gas amounts that went through round-off.
pub(crate) fn round_off_slack(scale: f64) -> f64 {
    1e-9 * scale.abs().max(1.0)
}
