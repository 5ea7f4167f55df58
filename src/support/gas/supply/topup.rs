use tracing::{debug, trace};

use crate::support::gas::{Mixture, PlannerError, Solver};

use super::GasSupply;

impl GasSupply {
    /// Fills with `mixture` until the cylinder reads `target_pressure`.
    ///
    /// When the mixtures match, the pressure is set directly.
    /// Otherwise the added amount is found with the secant method on
    /// `pressure_after_adding(v) - target_pressure`, the gas is added, and the
    /// pressure is pinned to exactly `target_pressure`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CallerPrecondition`] if `target_pressure` is
    /// below the current pressure, and [`PlannerError::NoConvergence`] if the
    /// secant iteration stalls or reaches its cap.
    pub fn topup(
        &mut self,
        mixture: &Mixture,
        target_pressure: f64,
    ) -> Result<&mut Self, PlannerError> {
        if target_pressure.is_nan() || target_pressure < self.pressure {
            return Err(PlannerError::precondition(format!(
                "cannot top up to {target_pressure}: cylinder is already at {}",
                self.pressure
            )));
        }

        if self.mixture == *mixture {
            self.pressure = target_pressure;
            return Ok(self);
        }

        let amount = self.topup_amount(mixture, target_pressure)?;
        self.add_gas(mixture, amount.max(0.0))?;
        self.pressure = target_pressure;
        Ok(self)
    }

    fn topup_amount(&self, mixture: &Mixture, target_pressure: f64) -> Result<f64, PlannerError> {
        let current = self.gas_amount()?;
        let tolerance = 0.005 / mixture.f_o2().max(mixture.f_he()).max(0.01);

        let residual = |added: f64| -> Result<f64, PlannerError> {
            Ok(self.pressure_after_adding(current, mixture, added)? - target_pressure)
        };

        let x0 = self.capacity_at(target_pressure, mixture)? - current;
        let mut x1 = self.capacity_at(target_pressure, &self.mixture)? - current;
        if (x1 - x0).abs() < tolerance {
            x1 = x0 + tolerance;
        }

        secant(residual, x0, x1, tolerance, self.config.max_secant_iters)
    }

    /// Pressure after adding `added` of `mixture` to `current` of what is held now.
    fn pressure_after_adding(
        &self,
        current: f64,
        mixture: &Mixture,
        added: f64,
    ) -> Result<f64, PlannerError> {
        let blended = self.mixture.blend(current, mixture, added);
        self.pressure_at((current + added).max(0.0), &blended)
    }
}

/// Secant iteration on `residual`, starting from `x0` and `x1`.
///
/// Stops when a step is shorter than `tolerance`. A flat or non-finite
/// secant is reported as a stall.
fn secant(
    mut residual: impl FnMut(f64) -> Result<f64, PlannerError>,
    mut x0: f64,
    mut x1: f64,
    tolerance: f64,
    max_iters: usize,
) -> Result<f64, PlannerError> {
    let mut f0 = residual(x0)?;
    let mut f1 = residual(x1)?;

    for iter in 1..=max_iters {
        if f1 == 0.0 {
            return Ok(x1);
        }

        let denominator = f1 - f0;
        if denominator == 0.0 || !denominator.is_finite() {
            debug!(iter, x0, x1, "topup secant stalled");
            return Err(PlannerError::NoConvergence {
                solver: Solver::Topup,
                iters: iter,
            });
        }

        let x2 = x1 - f1 * (x1 - x0) / denominator;
        let step = (x2 - x1).abs();
        trace!(iter, added = x2, step, tolerance, "topup secant step");

        if step < tolerance {
            debug!(iter, added = x2, "topup converged");
            return Ok(x2);
        }

        (x0, f0) = (x1, f1);
        x1 = x2;
        f1 = residual(x1)?;
    }

    debug!(max_iters, "topup hit iteration cap");
    Err(PlannerError::NoConvergence {
        solver: Solver::Topup,
        iters: max_iters,
    })
}
