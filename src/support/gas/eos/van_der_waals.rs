//! Van der Waals equation of state for breathing-gas mixtures.
//!
//! The equation relates pressure `P`, molar volume `v`, and temperature `T`:
//!
//! ```text
//! P = R·T / (v − b) − a / v²
//! ```
//!
//! Coefficients for a mixture come from the pure-gas constants of oxygen,
//! nitrogen, and helium combined with the quadratic mixing rule
//! `a = Σᵢ Σⱼ √(aᵢ·aⱼ)·xᵢ·xⱼ` (and likewise for `b`).
//!
//! Internally everything is evaluated in liters, atmospheres, moles, and
//! kelvin, matching the units the literature constants are published in.

use tracing::{debug, trace};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Volume},
    pressure::atmosphere,
    thermodynamic_temperature::kelvin,
    volume::liter,
};

use crate::support::gas::{Mixture, PlannerError, Solver};

/// Universal gas constant, L·atm/(mol·K).
const R: f64 = 0.082_057_366;

/// Attraction constants for O2, N2, He, in L²·atm/mol².
const A: [f64; 3] = [1.382, 1.370, 0.0346];

/// Excluded volumes for O2, N2, He, in L/mol.
const B: [f64; 3] = [0.031_86, 0.038_70, 0.023_80];

/// Van der Waals coefficients for a specific mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerWaals {
    /// Attraction term, L²·atm/mol².
    pub a: f64,
    /// Excluded volume, L/mol.
    pub b: f64,
}

impl VanDerWaals {
    /// Mixes the pure-gas coefficients for `mixture`.
    #[must_use]
    pub fn for_mixture(mixture: &Mixture) -> Self {
        Self {
            a: mixing_a(mixture),
            b: mixing_b(mixture),
        }
    }

    /// Pressure in atmospheres at molar volume `v` (L/mol) and temperature `t` (K).
    fn pressure(&self, v: f64, t: f64) -> f64 {
        R * t / (v - self.b) - self.a / (v * v)
    }

    /// Cubic in molar volume whose root is the state at pressure `p`, and its derivative.
    fn cubic(&self, v: f64, p: f64, rt: f64) -> (f64, f64) {
        let (a, b) = (self.a, self.b);
        let value = p * v.powi(3) - (p * b + rt) * v.powi(2) + a * v - a * b;
        let slope = 3.0 * p * v.powi(2) - 2.0 * (p * b + rt) * v + a;
        (value, slope)
    }
}

/// Mixture attraction coefficient `a`.
#[must_use]
pub fn mixing_a(mixture: &Mixture) -> f64 {
    mix(&A, mixture)
}

/// Mixture excluded-volume coefficient `b`.
#[must_use]
pub fn mixing_b(mixture: &Mixture) -> f64 {
    mix(&B, mixture)
}

fn mix(constants: &[f64; 3], mixture: &Mixture) -> f64 {
    let x = [mixture.f_o2(), mixture.f_n2(), mixture.f_he()];

    let mut total = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            total += (constants[i] * constants[j]).sqrt() * x[i] * x[j];
        }
    }
    total
}

/// Gas amount (volume at one atmosphere) held by `internal_volume` at `pressure`.
///
/// Solves the cubic form of the equation for molar volume with Newton–Raphson,
/// starting from the ideal-gas estimate `RT/P`.
/// Iteration stops once the step in molar volume is small enough that the
/// resulting amount is within `tolerance`.
///
/// # Errors
///
/// Returns [`PlannerError::NoConvergence`] if the iteration cap is reached or
/// the iteration leaves the physical domain.
pub fn gas_amount_at_pressure(
    internal_volume: Volume,
    pressure: Pressure,
    mixture: &Mixture,
    temperature: ThermodynamicTemperature,
    tolerance: Volume,
    max_iters: usize,
) -> Result<Volume, PlannerError> {
    let p = pressure.get::<atmosphere>();
    if p <= 0.0 {
        return Ok(Volume::new::<liter>(0.0));
    }

    let cylinder = internal_volume.get::<liter>();
    let rt = R * temperature.get::<kelvin>();
    let tolerance = tolerance.get::<liter>();
    let coefficients = VanDerWaals::for_mixture(mixture);

    let no_convergence = |iters| PlannerError::NoConvergence {
        solver: Solver::VanDerWaals,
        iters,
    };

    let mut v = rt / p;
    for iter in 1..=max_iters {
        let (value, slope) = coefficients.cubic(v, p, rt);
        if slope == 0.0 || !slope.is_finite() {
            return Err(no_convergence(iter));
        }

        let next = v - value / slope;
        if !(next.is_finite() && next > coefficients.b) {
            return Err(no_convergence(iter));
        }

        // d(amount)/dv = -V·R·T / (p_atm·v²), so this step bound keeps the
        // amount error below `tolerance`.
        let step_tolerance = tolerance * next * next / (cylinder * rt);
        let step = (next - v).abs();
        trace!(iter, v = next, step, step_tolerance, "van der waals newton step");

        v = next;
        if step < step_tolerance {
            return Ok(Volume::new::<liter>(cylinder / v * rt));
        }
    }

    debug!(max_iters, p, "van der waals solve hit iteration cap");
    Err(no_convergence(max_iters))
}

/// Pressure produced by `amount` of gas (volume at one atmosphere) in `internal_volume`.
///
/// This direction is closed-form: the amount fixes the moles, hence the molar volume.
#[must_use]
pub fn pressure_at_gas_amount(
    internal_volume: Volume,
    amount: Volume,
    mixture: &Mixture,
    temperature: ThermodynamicTemperature,
) -> Pressure {
    let amount = amount.get::<liter>();
    if amount <= 0.0 {
        return Pressure::new::<atmosphere>(0.0);
    }

    let t = temperature.get::<kelvin>();
    let moles = amount / (R * t);
    let v = internal_volume.get::<liter>() / moles;

    Pressure::new::<atmosphere>(VanDerWaals::for_mixture(mixture).pressure(v, t))
}
