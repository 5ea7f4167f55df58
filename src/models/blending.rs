//! Gas blending models.
//!
//! [`BlendPlanner`] works out how to turn the gas a cylinder holds into the
//! gas a diver asked for: how much to drain, and how much rich gas, helium,
//! and topup gas to add, in what order.
//! It implements [`twine_core::Model`] with a [`BlendRequest`] input.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use gas_blend_models::models::blending::BlendPlanner;
//! use gas_blend_models::support::gas::{Cylinder, GasLaw, GasSupply, Mixture};
//! use gas_blend_models::support::units::UnitSystem;
//!
//! let units = UnitSystem::Imperial;
//! let al80 = Arc::new(Cylinder::from_capacity(units, 80.0, 3000.0).unwrap());
//! let supply = |mixture, pressure| {
//!     GasSupply::new(
//!         Arc::clone(&al80),
//!         mixture,
//!         pressure,
//!         GasLaw::VanDerWaals,
//!         units.standard_temperature(),
//!     )
//! };
//!
//! let have = supply(Mixture::air(), 500.0);
//! let want = supply(Mixture::from_percent(32.0, 0.0).unwrap(), 3000.0);
//!
//! let plan = BlendPlanner::default()
//!     .solve(&have, &want, &Mixture::air(), &Mixture::oxygen(), false)
//!     .unwrap();
//!
//! assert!(plan.rich_amount() > 0.0);
//! assert_eq!(plan.helium_amount(), 0.0);
//! assert_eq!(plan.steps().last().unwrap().pressure, 3000.0);
//! ```

mod core;

pub use self::core::{BlendMode, BlendPlan, BlendStep, Infeasible, PinnedUnknown};

use twine_core::Model;

use crate::support::gas::{GasSupply, Mixture};

/// Plans blends in a fixed [`BlendMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendPlanner {
    mode: BlendMode,
}

impl BlendPlanner {
    #[must_use]
    pub fn new(mode: BlendMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Plans how to turn `have` into `want`.
    ///
    /// `topup` is the gas added last to reach the final pressure, typically
    /// air. `rich` supplies oxygen, typically pure oxygen.
    /// With `helium_first`, helium goes in before the rich gas.
    ///
    /// Amounts in the plan are in `have`'s units.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`] if the available gases cannot produce `want`
    /// from `have`, or if a gas law solve fails along the way.
    pub fn solve(
        &self,
        have: &GasSupply,
        want: &GasSupply,
        topup: &Mixture,
        rich: &Mixture,
        helium_first: bool,
    ) -> Result<BlendPlan, Infeasible> {
        self::core::plan_blend(have, want, topup, rich, helium_first, self.mode)
    }
}

/// Everything a [`BlendPlanner`] needs to plan one blend.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendRequest {
    pub have: GasSupply,
    pub want: GasSupply,
    pub topup: Mixture,
    pub rich: Mixture,
    pub helium_first: bool,
}

impl Model for BlendPlanner {
    type Input = BlendRequest;
    type Output = BlendPlan;
    type Error = Infeasible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.solve(
            &input.have,
            &input.want,
            &input.topup,
            &input.rich,
            input.helium_first,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::support::{
        gas::{Cylinder, GasLaw},
        units::UnitSystem,
    };

    fn request(gas_law: GasLaw) -> BlendRequest {
        let units = UnitSystem::Metric;
        let cylinder = Arc::new(Cylinder::new(units, 12.0, 232.0).unwrap());
        let supply = |mixture, pressure| {
            GasSupply::new(
                Arc::clone(&cylinder),
                mixture,
                pressure,
                gas_law,
                units.standard_temperature(),
            )
        };

        BlendRequest {
            have: supply(Mixture::from_percent(18.0, 45.0).unwrap(), 60.0),
            want: supply(Mixture::from_percent(18.0, 45.0).unwrap(), 220.0),
            topup: Mixture::air(),
            rich: Mixture::oxygen(),
            helium_first: true,
        }
    }

    #[test]
    fn model_call_matches_solve() {
        let planner = BlendPlanner::default();
        let input = request(GasLaw::VanDerWaals);

        let via_model = planner.call(&input).unwrap();
        let direct = planner
            .solve(&input.have, &input.want, &input.topup, &input.rich, true)
            .unwrap();

        assert_eq!(via_model, direct);
    }

    #[test]
    fn trimix_top_off() {
        let plan = BlendPlanner::default()
            .call(&request(GasLaw::Ideal))
            .unwrap();

        // Ideal gas: 160 bar of 18/45 is 72 bar helium, then oxygen, then air.
        let steps = plan.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].mixture, Mixture::helium());
        assert_relative_eq!(steps[0].pressure, 60.0 + 0.45 * 160.0, epsilon = 1e-9);
        assert_eq!(steps[1].mixture, Mixture::oxygen());
        assert_eq!(steps[2].mixture, Mixture::air());
        assert_relative_eq!(steps[2].pressure, 220.0);
        assert!(!plan.requires_drain());
    }

    #[test]
    fn mode_is_carried() {
        let planner = BlendPlanner::new(BlendMode::ContinuousTrimix);
        assert_eq!(planner.mode(), BlendMode::ContinuousTrimix);

        let plan = planner.call(&request(GasLaw::Ideal)).unwrap();
        assert_eq!(plan.steps().len(), 1);
    }
}
