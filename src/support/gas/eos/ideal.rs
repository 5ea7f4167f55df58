//! Ideal gas relations for a rigid cylinder.
//!
//! At constant temperature the ideal gas law reduces to Boyle's law:
//! `amount = p·V / p_atm`, where `amount` is the gas volume at one atmosphere.

use uom::si::{
    f64::{Pressure, Volume},
    pressure::atmosphere,
};

/// Gas amount held by `internal_volume` at `pressure`.
#[must_use]
pub fn amount_at_pressure(internal_volume: Volume, pressure: Pressure) -> Volume {
    internal_volume * (pressure / one_atmosphere())
}

/// Pressure produced by `amount` of gas in `internal_volume`.
#[must_use]
pub fn pressure_at_amount(internal_volume: Volume, amount: Volume) -> Pressure {
    one_atmosphere() * (amount / internal_volume)
}

fn one_atmosphere() -> Pressure {
    Pressure::new::<atmosphere>(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        pressure::{bar, pound_force_per_square_inch},
        volume::{cubic_foot, liter},
    };

    #[test]
    fn twelve_liters_at_two_hundred_bar() {
        let amount = amount_at_pressure(
            Volume::new::<liter>(12.0),
            Pressure::new::<bar>(200.0),
        );
        assert_relative_eq!(amount.get::<liter>(), 12.0 * 200.0 / 1.01325, max_relative = 1e-12);
    }

    #[test]
    fn pressure_amount_roundtrip() {
        let v = Volume::new::<cubic_foot>(0.39);
        let p = Pressure::new::<pound_force_per_square_inch>(3000.0);

        let amount = amount_at_pressure(v, p);
        let p_2 = pressure_at_amount(v, amount);

        assert_relative_eq!(
            p_2.get::<pound_force_per_square_inch>(),
            3000.0,
            max_relative = 1e-12
        );
    }
}
