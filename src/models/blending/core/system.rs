//! The component balance behind a blend.
//!
//! Rows are the oxygen, helium, and nitrogen balances; columns are the rich
//! gas, helium, and topup gas.
//! A solution gives the amount of each gas to add.
//!
//! When a naive solution calls for removing a gas, that gas is pinned to zero
//! and its column is replaced by the starting mixture.
//! The replaced unknown then becomes the amount left in the cylinder after a
//! drain, and the right-hand side becomes the absolute final composition.

use nalgebra::{Matrix3, Vector3};
use tracing::trace;

use crate::support::gas::Mixture;

/// Determinants below this are treated as singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Which added gas, if any, is pinned to zero in favor of draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PinnedUnknown {
    #[default]
    None,
    Rich,
    Helium,
    Topup,
}

impl PinnedUnknown {
    /// Cascade order used when a naive solution goes negative.
    pub(super) const CASCADE: [Self; 3] = [Self::Rich, Self::Helium, Self::Topup];

    fn column(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Rich => Some(0),
            Self::Helium => Some(1),
            Self::Topup => Some(2),
        }
    }
}

/// Component amounts (oxygen, helium, nitrogen) of a gas amount.
pub(super) fn components(mixture: &Mixture, amount: f64) -> Vector3<f64> {
    fractions(mixture) * amount
}

fn fractions(mixture: &Mixture) -> Vector3<f64> {
    Vector3::new(mixture.f_o2(), mixture.f_he(), mixture.f_n2())
}

/// The gases a blend can draw on, plus where it starts and ends.
#[derive(Debug, Clone, Copy)]
pub(super) struct BlendSystem {
    pub(super) start: Mixture,
    pub(super) rich: Mixture,
    pub(super) topup: Mixture,
    pub(super) initial: Vector3<f64>,
    pub(super) target: Vector3<f64>,
}

/// One solution of the balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Solution {
    pub(super) pinned: PinnedUnknown,
    pub(super) rich: f64,
    pub(super) helium: f64,
    pub(super) topup: f64,
    /// Amount left after draining; the full starting amount when nothing is pinned.
    pub(super) start: f64,
}

impl Solution {
    pub(super) fn amount(&self, unknown: PinnedUnknown) -> f64 {
        match unknown {
            PinnedUnknown::None => self.start,
            PinnedUnknown::Rich => self.rich,
            PinnedUnknown::Helium => self.helium,
            PinnedUnknown::Topup => self.topup,
        }
    }
}

impl BlendSystem {
    /// Solves the balance with `pinned` held at zero.
    ///
    /// Returns `None` if the system is singular.
    pub(super) fn solve(&self, pinned: PinnedUnknown) -> Option<Solution> {
        let mut columns = [
            fractions(&self.rich),
            Vector3::new(0.0, 1.0, 0.0),
            fractions(&self.topup),
        ];

        let rhs = match pinned.column() {
            None => self.target - self.initial,
            Some(column) => {
                columns[column] = fractions(&self.start);
                self.target
            }
        };

        let matrix = Matrix3::from_columns(&columns);
        if matrix.determinant().abs() < SINGULAR_DETERMINANT {
            trace!(?pinned, "blend system is singular");
            return None;
        }
        let x = matrix.lu().solve(&rhs)?;
        trace!(?pinned, rich = x[0], helium = x[1], topup = x[2], "blend system solved");

        let initial_amount = self.initial.sum();
        let solution = match pinned {
            PinnedUnknown::None => Solution {
                pinned,
                rich: x[0],
                helium: x[1],
                topup: x[2],
                start: initial_amount,
            },
            PinnedUnknown::Rich => Solution {
                pinned,
                rich: 0.0,
                helium: x[1],
                topup: x[2],
                start: x[0],
            },
            PinnedUnknown::Helium => Solution {
                pinned,
                rich: x[0],
                helium: 0.0,
                topup: x[2],
                start: x[1],
            },
            PinnedUnknown::Topup => Solution {
                pinned,
                rich: x[0],
                helium: x[1],
                topup: 0.0,
                start: x[2],
            },
        };
        Some(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn ean(percent: f64) -> Mixture {
        Mixture::from_percent(percent, 0.0).unwrap()
    }

    fn system(start: Mixture, start_amount: f64, target: Mixture, target_amount: f64) -> BlendSystem {
        BlendSystem {
            start,
            rich: Mixture::oxygen(),
            topup: Mixture::air(),
            initial: components(&start, start_amount),
            target: components(&target, target_amount),
        }
    }

    #[test]
    fn nitrox_from_empty() {
        let solution = system(Mixture::air(), 0.0, ean(32.0), 1000.0)
            .solve(PinnedUnknown::None)
            .unwrap();

        assert_relative_eq!(solution.topup, 680.0 / 0.79, epsilon = 1e-9);
        assert_relative_eq!(solution.rich, 320.0 - 0.21 * 680.0 / 0.79, epsilon = 1e-9);
        assert_relative_eq!(solution.helium, 0.0, epsilon = 1e-9);
        assert_relative_eq!(solution.start, 0.0);
    }

    #[test]
    fn leaner_target_needs_negative_oxygen() {
        let sys = system(ean(40.0), 1000.0, ean(32.0), 1000.0);

        let naive = sys.solve(PinnedUnknown::None).unwrap();
        assert!(naive.rich < 0.0);

        let pinned = sys.solve(PinnedUnknown::Rich).unwrap();
        assert_relative_eq!(pinned.rich, 0.0);
        assert_relative_eq!(pinned.start, 1000.0 * 0.11 / 0.19, epsilon = 1e-9);
        assert_relative_eq!(pinned.topup, 1000.0 * 0.08 / 0.19, epsilon = 1e-9);
        assert_relative_eq!(pinned.helium, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn helium_topup_cannot_supply_nitrogen() {
        let sys = BlendSystem {
            topup: Mixture::helium(),
            ..system(Mixture::air(), 0.0, Mixture::air(), 1000.0)
        };
        assert_eq!(sys.solve(PinnedUnknown::None), None);
    }

    #[test]
    fn pinning_helium_when_start_has_none_is_singular() {
        // Air start and air topup are parallel columns once helium is replaced.
        let sys = system(Mixture::air(), 500.0, ean(32.0), 1000.0);
        assert_eq!(sys.solve(PinnedUnknown::Helium), None);
    }

    #[test]
    fn solution_amount_by_unknown() {
        let solution = system(Mixture::air(), 100.0, ean(32.0), 1000.0)
            .solve(PinnedUnknown::None)
            .unwrap();

        assert_relative_eq!(solution.amount(PinnedUnknown::None), 100.0, epsilon = 1e-9);
        assert_relative_eq!(solution.amount(PinnedUnknown::Rich), solution.rich);
        assert_relative_eq!(solution.amount(PinnedUnknown::Topup), solution.topup);
    }
}
