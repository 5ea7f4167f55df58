use thiserror::Error;

use crate::support::gas::PlannerError;

use super::PinnedUnknown;

/// No blend plan exists for the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Infeasible {
    /// The available gases cannot reach the target composition.
    #[error("blend system is singular (pinned: {pinned:?})")]
    SingularSystem { pinned: PinnedUnknown },

    /// Every substitution still calls for removing a gas.
    #[error("blend requires a negative gas amount (pinned: {pinned:?})")]
    NegativeAmount { pinned: PinnedUnknown },

    /// The plan would start from more gas than the cylinder holds, or from less than none.
    #[error("blend must start from {required}, but the cylinder holds {available}")]
    StartingAmountOutOfRange { required: f64, available: f64 },

    /// A gas law or topup solve failed along the way.
    #[error("numerical failure while planning")]
    Numerical(#[from] PlannerError),
}
