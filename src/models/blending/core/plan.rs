use crate::support::{
    constraint::{Constrained, NonNegative},
    gas::Mixture,
};

use super::PinnedUnknown;

/// How gases are introduced into the cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Each gas is added on its own, read off the gauge.
    #[default]
    PartialPressure,
    /// Oxygen is premixed into the topup stream; helium is still added first.
    ContinuousNitrox,
    /// Every gas is premixed into a single stream.
    ContinuousTrimix,
}

/// One fill operation: add `amount` of `mixture` until the gauge reads `pressure`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendStep {
    /// Gauge reading at the end of the step, in the cylinder's units.
    pub pressure: f64,
    /// Gas amount added by the step.
    pub amount: f64,
    pub mixture: Mixture,
}

/// A feasible way to turn one cylinder's contents into another.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendPlan {
    pub(super) drained: Constrained<f64, NonNegative>,
    pub(super) start_amount: Constrained<f64, NonNegative>,
    pub(super) start_pressure: f64,
    pub(super) rich: Constrained<f64, NonNegative>,
    pub(super) helium: Constrained<f64, NonNegative>,
    pub(super) topup: Constrained<f64, NonNegative>,
    pub(super) pinned: PinnedUnknown,
    pub(super) steps: Vec<BlendStep>,
}

impl BlendPlan {
    /// Gas amount left in the cylinder once any drain is done.
    #[must_use]
    pub fn start_amount(&self) -> f64 {
        self.start_amount.into_inner()
    }

    /// Gauge reading once any drain is done.
    #[must_use]
    pub fn start_pressure(&self) -> f64 {
        self.start_pressure
    }

    /// Gas amount released before filling.
    #[must_use]
    pub fn drained_amount(&self) -> f64 {
        self.drained.into_inner()
    }

    #[must_use]
    pub fn requires_drain(&self) -> bool {
        self.drained_amount() > 0.0
    }

    #[must_use]
    pub fn rich_amount(&self) -> f64 {
        self.rich.into_inner()
    }

    #[must_use]
    pub fn helium_amount(&self) -> f64 {
        self.helium.into_inner()
    }

    #[must_use]
    pub fn topup_amount(&self) -> f64 {
        self.topup.into_inner()
    }

    /// Total gas amount added across all steps.
    #[must_use]
    pub fn total_added(&self) -> f64 {
        (self.rich + self.helium + self.topup).into_inner()
    }

    /// Which added gas was replaced by a drain to make the plan feasible.
    #[must_use]
    pub fn pinned(&self) -> PinnedUnknown {
        self.pinned
    }

    /// Fill operations in the order they are performed, after any drain.
    #[must_use]
    pub fn steps(&self) -> &[BlendStep] {
        &self.steps
    }
}
