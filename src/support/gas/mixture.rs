use crate::support::constraint::{Constrained, UnitInterval};

use super::InvalidMixture;

/// A breathing-gas composition.
///
/// Stores the oxygen and helium fractions; nitrogen is whatever remains.
/// Mixtures are immutable: blending two mixtures returns a new one.
///
/// Equality is exact on the stored fractions.
///
/// # Example
///
/// ```
/// use gas_blend_models::support::gas::{Mixture, MixtureKind};
///
/// let tx = Mixture::new(0.21, 0.35).unwrap();
/// assert!((tx.f_n2() - 0.44).abs() < 1e-12);
/// assert_eq!(tx.friendly_kind(), MixtureKind::Trimix);
///
/// assert!(Mixture::new(0.8, 0.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    o2: Constrained<f64, UnitInterval>,
    he: Constrained<f64, UnitInterval>,
}

/// Broad classification of a [`Mixture`], as a blender would name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixtureKind {
    Oxygen,
    Helium,
    Nitrogen,
    Air,
    Nitrox,
    Trimix,
}

impl Mixture {
    /// Creates a mixture from oxygen and helium fractions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMixture`] if either fraction lies outside `[0, 1]`
    /// or if together they exceed one.
    pub fn new(f_o2: f64, f_he: f64) -> Result<Self, InvalidMixture> {
        let o2 = UnitInterval::new(f_o2).map_err(|source| InvalidMixture::Fraction {
            gas: "oxygen",
            value: f_o2,
            source,
        })?;
        let he = UnitInterval::new(f_he).map_err(|source| InvalidMixture::Fraction {
            gas: "helium",
            value: f_he,
            source,
        })?;

        let sum = f_o2 + f_he;
        if sum > 1.0 {
            return Err(InvalidMixture::ExceedsUnity { sum });
        }

        Ok(Self { o2, he })
    }

    /// Creates a mixture from oxygen and helium percentages.
    ///
    /// # Errors
    ///
    /// Same as [`Mixture::new`].
    pub fn from_percent(o2: f64, he: f64) -> Result<Self, InvalidMixture> {
        Self::new(o2 / 100.0, he / 100.0)
    }

    /// Atmospheric air, 21% oxygen and the rest nitrogen.
    #[must_use]
    pub fn air() -> Self {
        Self::new_unchecked(0.21, 0.0)
    }

    #[must_use]
    pub fn oxygen() -> Self {
        Self::new_unchecked(1.0, 0.0)
    }

    #[must_use]
    pub fn helium() -> Self {
        Self::new_unchecked(0.0, 1.0)
    }

    #[must_use]
    pub fn nitrogen() -> Self {
        Self::new_unchecked(0.0, 0.0)
    }

    fn new_unchecked(f_o2: f64, f_he: f64) -> Self {
        Self {
            o2: Constrained::new_unchecked(f_o2),
            he: Constrained::new_unchecked(f_he),
        }
    }

    #[must_use]
    pub fn f_o2(&self) -> f64 {
        self.o2.into_inner()
    }

    #[must_use]
    pub fn f_he(&self) -> f64 {
        self.he.into_inner()
    }

    #[must_use]
    pub fn f_n2(&self) -> f64 {
        1.0 - self.f_o2() - self.f_he()
    }

    #[must_use]
    pub fn percent_o2(&self) -> f64 {
        self.f_o2() * 100.0
    }

    #[must_use]
    pub fn percent_he(&self) -> f64 {
        self.f_he() * 100.0
    }

    /// Exact comparison of the stored fractions.
    #[must_use]
    pub fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }

    /// Names the mixture the way a fill log would.
    ///
    /// Boundaries are checked on percentages rounded to a tenth of a percent,
    /// so a blended 20.99999% mixture still reads as air.
    #[must_use]
    pub fn friendly_kind(&self) -> MixtureKind {
        let o2 = tenths_of_percent(self.f_o2());
        let he = tenths_of_percent(self.f_he());

        match (o2, he) {
            (1000, _) => MixtureKind::Oxygen,
            (_, 1000) => MixtureKind::Helium,
            (0, 0) => MixtureKind::Nitrogen,
            (210, 0) => MixtureKind::Air,
            (_, 0) => MixtureKind::Nitrox,
            _ => MixtureKind::Trimix,
        }
    }

    /// Returns the mixture obtained by combining `amount` of this mixture with
    /// `other_amount` of `other`.
    ///
    /// Fractions are amount-weighted averages.
    /// If the combined amount is not positive, `self` is returned unchanged.
    #[must_use]
    pub fn blend(&self, amount: f64, other: &Self, other_amount: f64) -> Self {
        let total = amount + other_amount;
        if total.is_nan() || total <= 0.0 {
            return *self;
        }

        let f_o2 = (self.f_o2() * amount + other.f_o2() * other_amount) / total;
        let f_he = (self.f_he() * amount + other.f_he() * other_amount) / total;

        // Round-off can push a sum of fractions a hair past one.
        let f_o2 = f_o2.clamp(0.0, 1.0);
        let f_he = f_he.clamp(0.0, 1.0 - f_o2);
        Self::new_unchecked(f_o2, f_he)
    }
}

fn tenths_of_percent(fraction: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let tenths = (fraction * 1000.0).round() as i64;
    tenths
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn fractions_and_accessors() {
        let ean32 = Mixture::from_percent(32.0, 0.0).unwrap();
        assert_relative_eq!(ean32.f_o2(), 0.32);
        assert_relative_eq!(ean32.f_he(), 0.0);
        assert_relative_eq!(ean32.f_n2(), 0.68);
        assert_relative_eq!(ean32.percent_o2(), 32.0);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            Mixture::new(-0.1, 0.0),
            Err(InvalidMixture::Fraction {
                gas: "oxygen",
                source: ConstraintError::BelowMinimum,
                ..
            })
        ));
        assert!(matches!(
            Mixture::new(0.21, f64::NAN),
            Err(InvalidMixture::Fraction {
                gas: "helium",
                source: ConstraintError::NotANumber,
                ..
            })
        ));
        assert!(matches!(
            Mixture::new(0.5, 0.6),
            Err(InvalidMixture::ExceedsUnity { .. })
        ));
        assert!(Mixture::new(0.21, 0.79).is_ok());
    }

    #[test]
    fn friendly_kinds() {
        assert_eq!(Mixture::oxygen().friendly_kind(), MixtureKind::Oxygen);
        assert_eq!(Mixture::helium().friendly_kind(), MixtureKind::Helium);
        assert_eq!(Mixture::nitrogen().friendly_kind(), MixtureKind::Nitrogen);
        assert_eq!(Mixture::air().friendly_kind(), MixtureKind::Air);
        assert_eq!(
            Mixture::from_percent(21.0, 0.0).unwrap().friendly_kind(),
            MixtureKind::Air
        );
        assert_eq!(
            Mixture::from_percent(22.0, 0.0).unwrap().friendly_kind(),
            MixtureKind::Nitrox
        );
        assert_eq!(
            Mixture::from_percent(21.0, 35.0).unwrap().friendly_kind(),
            MixtureKind::Trimix
        );
        // Heliox is classified as trimix: it is neither pure nor nitrox.
        assert_eq!(
            Mixture::from_percent(20.0, 80.0).unwrap().friendly_kind(),
            MixtureKind::Trimix
        );
    }

    #[test]
    fn equality_is_exact() {
        let a = Mixture::new(0.32, 0.0).unwrap();
        let b = Mixture::new(0.32 + 1e-12, 0.0).unwrap();
        assert!(a.is_equal_to(&a));
        assert!(!a.is_equal_to(&b));
    }

    #[test]
    fn blend_weights_by_amount() {
        let blended = Mixture::air().blend(790.0, &Mixture::oxygen(), 210.0);
        assert_relative_eq!(blended.f_o2(), 0.3759, epsilon = 1e-12);
        assert_relative_eq!(blended.f_he(), 0.0);

        let tx = Mixture::air().blend(100.0, &Mixture::helium(), 100.0);
        assert_relative_eq!(tx.f_o2(), 0.105);
        assert_relative_eq!(tx.f_he(), 0.5);
    }

    #[test]
    fn blend_into_empty_takes_added_mixture() {
        let ean50 = Mixture::from_percent(50.0, 0.0).unwrap();
        assert_eq!(Mixture::air().blend(0.0, &ean50, 40.0), ean50);
        assert_eq!(Mixture::air().blend(0.0, &ean50, 0.0), Mixture::air());
    }

    proptest! {
        #[test]
        fn fractions_sum_to_one(f_o2 in 0.0..=1.0_f64, share in 0.0..=1.0_f64) {
            let f_he = (1.0 - f_o2) * share;
            let mixture = Mixture::new(f_o2, f_he).unwrap();
            prop_assert!((mixture.f_o2() + mixture.f_he() + mixture.f_n2() - 1.0).abs() < 1e-12);
        }

        #[test]
        fn blends_stay_valid(
            a_o2 in 0.0..=1.0_f64,
            b_he in 0.0..=1.0_f64,
            a_amount in 0.0..5000.0_f64,
            b_amount in 0.0..5000.0_f64,
        ) {
            let a = Mixture::new(a_o2, 0.0).unwrap();
            let b = Mixture::new(0.0, b_he).unwrap();
            let blended = a.blend(a_amount, &b, b_amount);
            prop_assert!(Mixture::new(blended.f_o2(), blended.f_he()).is_ok());
        }
    }
}
