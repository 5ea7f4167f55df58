use std::fmt;

use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// A gas mixture whose fractions are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidMixture {
    /// A single fraction is negative, above one, or not a number.
    #[error("invalid {gas} fraction: {value}")]
    Fraction {
        gas: &'static str,
        value: f64,
        #[source]
        source: ConstraintError,
    },

    /// Oxygen and helium together exceed the whole mixture.
    #[error("oxygen and helium fractions sum to {sum}, which exceeds 1")]
    ExceedsUnity { sum: f64 },
}

/// The iterative method that failed to converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Newton–Raphson on the Van der Waals cubic.
    VanDerWaals,
    /// Secant search for a topup amount.
    Topup,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VanDerWaals => f.write_str("van der waals"),
            Self::Topup => f.write_str("topup"),
        }
    }
}

/// Errors raised by cylinder and gas supply operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error(transparent)]
    InvalidMixture(#[from] InvalidMixture),

    /// An iterative solve hit its iteration cap or lost its search direction.
    ///
    /// This is a limit of the numerical method, not a statement about
    /// physical feasibility.
    #[error("{solver} solve did not converge after {iters} iterations")]
    NoConvergence { solver: Solver, iters: usize },

    /// The caller asked for something the operation does not accept,
    /// such as draining to more gas than the cylinder holds.
    #[error("caller precondition violated: {context}")]
    CallerPrecondition { context: String },
}

impl PlannerError {
    pub(crate) fn precondition(context: impl Into<String>) -> Self {
        Self::CallerPrecondition {
            context: context.into(),
        }
    }
}
