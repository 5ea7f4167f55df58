//! Blend planning for a single cylinder.
//!
//! A plan is found in three stages:
//!
//! 1. Balance oxygen, helium, and nitrogen between what the cylinder holds
//!    and what it should hold, solving for the amounts of rich gas, helium,
//!    and topup gas to add.
//! 2. If that calls for a negative amount, pin that gas to zero and solve for
//!    how much to drain instead, trying rich gas, then helium, then topup.
//! 3. Replay the plan on a copy of the starting supply to read off the gauge
//!    pressure after each step.

mod error;
mod plan;
mod steps;
mod system;

#[cfg(test)]
mod test_support;

pub use error::Infeasible;
pub use plan::{BlendMode, BlendPlan, BlendStep};
pub use system::PinnedUnknown;

use tracing::debug;

use crate::support::{
    constraint::{Constrained, NonNegative},
    gas::{GasSupply, Mixture, round_off_slack},
    units::UnitSystem,
};

use steps::{Simulated, Sources, simulate};
use system::{BlendSystem, Solution, components};

/// Plans how to turn `have` into `want`.
///
/// Amounts in the plan are expressed in `have`'s units.
///
/// # Errors
///
/// Returns [`Infeasible`] if no admissible plan exists or a gas law solve fails.
pub(super) fn plan_blend(
    have: &GasSupply,
    want: &GasSupply,
    topup: &Mixture,
    rich: &Mixture,
    helium_first: bool,
    mode: BlendMode,
) -> Result<BlendPlan, Infeasible> {
    let units = have.units();
    let available = have.gas_amount()?;
    let same_cylinder = have.cylinder() == want.cylinder();
    let final_pressure = UnitSystem::convert_pressure(want.pressure(), want.units(), units);

    if same_cylinder && have.mixture() == want.mixture() && have.pressure() == final_pressure {
        debug!(pressure = final_pressure, "cylinder already holds the requested gas");
        return Ok(BlendPlan {
            drained: NonNegative::zero(),
            start_amount: clamp_amount(available, 0.0),
            start_pressure: have.pressure(),
            rich: NonNegative::zero(),
            helium: NonNegative::zero(),
            topup: NonNegative::zero(),
            pinned: PinnedUnknown::None,
            steps: Vec::new(),
        });
    }

    let target = UnitSystem::convert_capacity(want.gas_amount()?, want.units(), units);
    let slack = round_off_slack(target.max(available));

    let system = BlendSystem {
        start: *have.mixture(),
        rich: *rich,
        topup: *topup,
        initial: components(have.mixture(), available),
        target: components(want.mixture(), target),
    };

    let solution = cascade(&system, available, slack)?;
    check_admissible(&solution, available, slack)?;

    let solution = Solution {
        rich: snap(solution.rich, slack),
        helium: snap(solution.helium, slack),
        topup: snap(solution.topup, slack),
        start: match solution.pinned {
            PinnedUnknown::None => available,
            _ => snap(solution.start, slack).min(available),
        },
        ..solution
    };

    let sources = Sources {
        rich,
        topup,
        helium_first,
    };
    let Simulated {
        start_pressure,
        steps,
    } = simulate(
        have,
        &solution,
        sources,
        mode,
        same_cylinder.then_some(final_pressure),
    )?;

    debug!(
        pinned = ?solution.pinned,
        start = solution.start,
        rich = solution.rich,
        helium = solution.helium,
        topup = solution.topup,
        steps = steps.len(),
        "blend planned"
    );

    Ok(BlendPlan {
        drained: clamp_amount(available - solution.start, slack),
        start_amount: clamp_amount(solution.start, slack),
        start_pressure,
        rich: clamp_amount(solution.rich, slack),
        helium: clamp_amount(solution.helium, slack),
        topup: clamp_amount(solution.topup, slack),
        pinned: solution.pinned,
        steps,
    })
}

/// Re-solves with a pinned unknown for each negative amount, in cascade order.
fn cascade(system: &BlendSystem, available: f64, slack: f64) -> Result<Solution, Infeasible> {
    let mut solution = system
        .solve(PinnedUnknown::None)
        .ok_or(Infeasible::SingularSystem {
            pinned: PinnedUnknown::None,
        })?;

    for pinned in PinnedUnknown::CASCADE {
        if is_admissible(&solution, available, slack) {
            break;
        }
        let amount = solution.amount(pinned);
        if amount >= -slack {
            continue;
        }

        debug!(?pinned, amount, "negative amount, solving for a drain instead");
        solution = system
            .solve(pinned)
            .ok_or(Infeasible::SingularSystem { pinned })?;
    }

    Ok(solution)
}

fn is_admissible(solution: &Solution, available: f64, slack: f64) -> bool {
    check_admissible(solution, available, slack).is_ok()
}

fn check_admissible(solution: &Solution, available: f64, slack: f64) -> Result<(), Infeasible> {
    if [solution.rich, solution.helium, solution.topup]
        .iter()
        .any(|&amount| amount < -slack)
    {
        return Err(Infeasible::NegativeAmount {
            pinned: solution.pinned,
        });
    }

    if solution.start < -slack || solution.start > available + slack {
        return Err(Infeasible::StartingAmountOutOfRange {
            required: solution.start,
            available,
        });
    }

    Ok(())
}

/// Treats round-off around zero as exactly zero.
fn snap(amount: f64, slack: f64) -> f64 {
    if amount <= slack { 0.0 } else { amount }
}

fn clamp_amount(amount: f64, slack: f64) -> Constrained<f64, NonNegative> {
    Constrained::new_unchecked(snap(amount, slack).max(0.0))
}
