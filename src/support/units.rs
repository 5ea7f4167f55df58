//! Unit systems for blending inputs and results.
//!
//! Blenders think in whole gauge readings: psi and cubic feet on one side of
//! the Atlantic, bar and liters on the other.
//! The public blending API therefore takes and returns plain `f64` values
//! expressed in a [`UnitSystem`], while the physics runs on [`uom`]
//! quantities.
//! The `*_value` / quantity bridges on [`UnitSystem`] convert between the two.
//!
//! All conversions pivot through [`uom`]'s SI representation, so converting
//! from one system to another is `to.value(from.quantity(x))`.
//! Converting within a system returns the value untouched.
//!
//! ```
//! use gas_blend_models::support::units::UnitSystem;
//!
//! let bar = UnitSystem::convert_pressure(3000.0, UnitSystem::Imperial, UnitSystem::Metric);
//! assert!((bar - 206.84).abs() < 0.01);
//! ```
//!
//! There is no process-wide "current" unit system.
//! Every value that needs one carries it explicitly.

use uom::si::{
    f64::{Length, Pressure, ThermodynamicTemperature, Volume},
    length::{foot, meter},
    pressure::{atmosphere, bar, pound_force_per_square_inch},
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit, degree_rankine, kelvin},
    volume::{cubic_foot, liter},
};

/// A family of display units and blending conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// psi, cubic feet, feet, degrees Fahrenheit.
    Imperial,
    /// bar, liters, meters, degrees Celsius.
    #[default]
    Metric,
}

impl UnitSystem {
    /// Smallest pressure step a blender reads off a gauge.
    #[must_use]
    pub fn pressure_increment(self) -> f64 {
        match self {
            Self::Imperial => 100.0,
            Self::Metric => 10.0,
        }
    }

    /// Pressure at which a cylinder is considered low.
    #[must_use]
    pub fn pressure_tank_low(self) -> f64 {
        match self {
            Self::Imperial => 500.0,
            Self::Metric => 50.0,
        }
    }

    /// Typical full-cylinder pressure.
    #[must_use]
    pub fn pressure_tank_full(self) -> f64 {
        match self {
            Self::Imperial => 3000.0,
            Self::Metric => 200.0,
        }
    }

    /// Upper bound for pressures a host should accept.
    #[must_use]
    pub fn pressure_tank_max(self) -> f64 {
        match self {
            Self::Imperial => 4500.0,
            Self::Metric => 300.0,
        }
    }

    /// Standard depth step used for dive-planning limits.
    #[must_use]
    pub fn depth_increment(self) -> f64 {
        match self {
            Self::Imperial => 10.0,
            Self::Metric => 3.0,
        }
    }

    /// Depth of seawater that adds one atmosphere of pressure.
    #[must_use]
    pub fn depth_per_atm(self) -> f64 {
        match self {
            Self::Imperial => 33.0,
            Self::Metric => 10.0,
        }
    }

    /// One standard atmosphere in this system's pressure unit.
    #[must_use]
    pub fn atm_pressure(self) -> f64 {
        self.pressure_value(Pressure::new::<atmosphere>(1.0))
    }

    /// Universal gas constant in this system's units.
    ///
    /// ft³·psi/(lb·mol·°R) for imperial, L·bar/(mol·K) for metric.
    #[must_use]
    pub fn gas_constant(self) -> f64 {
        match self {
            Self::Imperial => 10.7316,
            Self::Metric => 0.083_144_6,
        }
    }

    /// Ambient temperature assumed when the host supplies none.
    #[must_use]
    pub fn standard_temperature(self) -> ThermodynamicTemperature {
        match self {
            Self::Imperial => ThermodynamicTemperature::new::<degree_fahrenheit>(70.0),
            Self::Metric => ThermodynamicTemperature::new::<degree_celsius>(20.0),
        }
    }

    /// Interprets `value` as a pressure in this system.
    #[must_use]
    pub fn pressure(self, value: f64) -> Pressure {
        match self {
            Self::Imperial => Pressure::new::<pound_force_per_square_inch>(value),
            Self::Metric => Pressure::new::<bar>(value),
        }
    }

    /// Expresses `pressure` in this system's pressure unit.
    #[must_use]
    pub fn pressure_value(self, pressure: Pressure) -> f64 {
        match self {
            Self::Imperial => pressure.get::<pound_force_per_square_inch>(),
            Self::Metric => pressure.get::<bar>(),
        }
    }

    /// Interprets `value` as a gas amount (volume at one atmosphere).
    #[must_use]
    pub fn capacity(self, value: f64) -> Volume {
        self.volume(value)
    }

    /// Expresses a gas amount in this system's capacity unit.
    #[must_use]
    pub fn capacity_value(self, capacity: Volume) -> f64 {
        self.volume_value(capacity)
    }

    /// Interprets `value` as a cylinder internal (water) volume.
    #[must_use]
    pub fn volume(self, value: f64) -> Volume {
        match self {
            Self::Imperial => Volume::new::<cubic_foot>(value),
            Self::Metric => Volume::new::<liter>(value),
        }
    }

    /// Expresses a volume in this system's volume unit.
    #[must_use]
    pub fn volume_value(self, volume: Volume) -> f64 {
        match self {
            Self::Imperial => volume.get::<cubic_foot>(),
            Self::Metric => volume.get::<liter>(),
        }
    }

    /// Interprets `value` as a depth of seawater.
    #[must_use]
    pub fn depth(self, value: f64) -> Length {
        match self {
            Self::Imperial => Length::new::<foot>(value),
            Self::Metric => Length::new::<meter>(value),
        }
    }

    /// Expresses a depth in this system's depth unit.
    #[must_use]
    pub fn depth_value(self, depth: Length) -> f64 {
        match self {
            Self::Imperial => depth.get::<foot>(),
            Self::Metric => depth.get::<meter>(),
        }
    }

    /// Interprets `value` as a thermometer reading (°F or °C).
    #[must_use]
    pub fn temperature(self, value: f64) -> ThermodynamicTemperature {
        match self {
            Self::Imperial => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
            Self::Metric => ThermodynamicTemperature::new::<degree_celsius>(value),
        }
    }

    /// Expresses a temperature as a thermometer reading (°F or °C).
    #[must_use]
    pub fn temperature_value(self, temperature: ThermodynamicTemperature) -> f64 {
        match self {
            Self::Imperial => temperature.get::<degree_fahrenheit>(),
            Self::Metric => temperature.get::<degree_celsius>(),
        }
    }

    /// Interprets `value` as an absolute temperature (°R or K).
    #[must_use]
    pub fn absolute_temperature(self, value: f64) -> ThermodynamicTemperature {
        match self {
            Self::Imperial => ThermodynamicTemperature::new::<degree_rankine>(value),
            Self::Metric => ThermodynamicTemperature::new::<kelvin>(value),
        }
    }

    /// Expresses a temperature on this system's absolute scale (°R or K).
    #[must_use]
    pub fn absolute_temperature_value(self, temperature: ThermodynamicTemperature) -> f64 {
        match self {
            Self::Imperial => temperature.get::<degree_rankine>(),
            Self::Metric => temperature.get::<kelvin>(),
        }
    }

    /// Converts a pressure reading between systems.
    #[must_use]
    pub fn convert_pressure(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.pressure_value(from.pressure(value))
    }

    /// Converts a depth between systems.
    #[must_use]
    pub fn convert_depth(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.depth_value(from.depth(value))
    }

    /// Converts a gas amount between systems.
    #[must_use]
    pub fn convert_capacity(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.capacity_value(from.capacity(value))
    }

    /// Converts an internal volume between systems.
    #[must_use]
    pub fn convert_volume(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.volume_value(from.volume(value))
    }

    /// Converts a thermometer reading between systems.
    #[must_use]
    pub fn convert_temperature(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.temperature_value(from.temperature(value))
    }

    /// Converts an absolute temperature between systems.
    #[must_use]
    pub fn convert_absolute_temperature(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.absolute_temperature_value(from.absolute_temperature(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use super::UnitSystem::{Imperial, Metric};

    #[test]
    fn same_system_is_identity() {
        assert_relative_eq!(UnitSystem::convert_pressure(232.0, Metric, Metric), 232.0);
        assert_relative_eq!(UnitSystem::convert_depth(130.0, Imperial, Imperial), 130.0);
    }

    #[test]
    fn pressure() {
        assert_relative_eq!(
            UnitSystem::convert_pressure(200.0, Metric, Imperial),
            2900.75,
            epsilon = 0.01
        );
        assert_relative_eq!(Imperial.atm_pressure(), 14.6959, epsilon = 1e-4);
        assert_relative_eq!(Metric.atm_pressure(), 1.01325, epsilon = 1e-9);
    }

    #[test]
    fn depth_and_volume() {
        assert_relative_eq!(
            UnitSystem::convert_depth(30.0, Metric, Imperial),
            98.425,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            UnitSystem::convert_capacity(80.0, Imperial, Metric),
            2265.348,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            UnitSystem::convert_volume(11.1, Metric, Imperial),
            0.391993,
            epsilon = 1e-5
        );
    }

    #[test]
    fn temperatures() {
        assert_relative_eq!(
            UnitSystem::convert_temperature(70.0, Imperial, Metric),
            21.1111,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            UnitSystem::convert_absolute_temperature(293.15, Metric, Imperial),
            527.67,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Metric.temperature_value(Imperial.standard_temperature()),
            21.1111,
            epsilon = 1e-4
        );
    }

    #[test]
    fn tables_differ_by_system() {
        assert_relative_eq!(Imperial.depth_per_atm() / Imperial.depth_increment(), 3.3);
        assert_relative_eq!(Metric.depth_per_atm() / Metric.depth_increment(), 10.0 / 3.0);
        assert!(Metric.pressure_tank_low() < Metric.pressure_tank_full());
        assert!(Imperial.pressure_tank_full() < Imperial.pressure_tank_max());
        assert_relative_eq!(
            Metric.gas_constant() / Metric.atm_pressure(),
            0.082_057,
            epsilon = 1e-5
        );
    }
}
