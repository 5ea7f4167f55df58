use tracing::debug;

use crate::support::gas::{GasSupply, Mixture, PlannerError};

use super::{BlendMode, BlendStep, system::Solution};

/// Gases the plan draws on.
#[derive(Debug, Clone, Copy)]
pub(super) struct Sources<'a> {
    pub(super) rich: &'a Mixture,
    pub(super) topup: &'a Mixture,
    pub(super) helium_first: bool,
}

/// A drained starting point and the fill steps that follow it.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Simulated {
    pub(super) start_pressure: f64,
    pub(super) steps: Vec<BlendStep>,
}

/// Replays `solution` on a copy of `have` to read off step pressures.
///
/// Draining always comes first and the topup gas always comes last.
/// The final step's pressure is pinned to `final_pressure` when given.
pub(super) fn simulate(
    have: &GasSupply,
    solution: &Solution,
    sources: Sources<'_>,
    mode: BlendMode,
    final_pressure: Option<f64>,
) -> Result<Simulated, PlannerError> {
    let mut supply = have.clone();

    if solution.start < have.gas_amount()? {
        supply.drain_to_gas_amount(solution.start)?;
    }
    let start_pressure = supply.pressure();

    let helium = Mixture::helium();
    let fills: Vec<(Mixture, f64)> = match mode {
        BlendMode::PartialPressure => {
            let rich = (*sources.rich, solution.rich);
            let he = (helium, solution.helium);
            let first_two = if sources.helium_first {
                [he, rich]
            } else {
                [rich, he]
            };
            first_two
                .into_iter()
                .chain([(*sources.topup, solution.topup)])
                .collect()
        }
        BlendMode::ContinuousNitrox => {
            let stream = sources
                .rich
                .blend(solution.rich, sources.topup, solution.topup);
            vec![
                (helium, solution.helium),
                (stream, solution.rich + solution.topup),
            ]
        }
        BlendMode::ContinuousTrimix => {
            let rich_and_helium = helium.blend(solution.helium, sources.rich, solution.rich);
            let stream = rich_and_helium.blend(
                solution.helium + solution.rich,
                sources.topup,
                solution.topup,
            );
            vec![(stream, solution.helium + solution.rich + solution.topup)]
        }
    };

    let mut steps = Vec::with_capacity(fills.len());
    for (mixture, amount) in fills {
        if amount <= 0.0 {
            continue;
        }
        supply.add_gas(&mixture, amount)?;
        debug!(
            amount,
            pressure = supply.pressure(),
            o2 = mixture.f_o2(),
            he = mixture.f_he(),
            "blend step"
        );
        steps.push(BlendStep {
            pressure: supply.pressure(),
            amount,
            mixture,
        });
    }

    if let (Some(last), Some(pressure)) = (steps.last_mut(), final_pressure) {
        last.pressure = pressure;
    }

    Ok(Simulated {
        start_pressure,
        steps,
    })
}
