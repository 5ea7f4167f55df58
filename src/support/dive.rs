//! Dive-planning metrics derived from a mixture.
//!
//! Depths are seawater depths in the [`UnitSystem`]'s depth unit, and
//! pressures are absolute, in atmospheres.
//! Results are rounded to the system's depth increment in the conservative
//! direction: limits a diver must stay above (MOD) round shallower, while
//! equivalent depths and oxygen ceilings round deeper.
//! No result is shallower than the surface.

use crate::support::{
    gas::{InvalidMixture, Mixture},
    units::UnitSystem,
};

/// Fraction of nitrogen in air, the reference for equivalent depths.
const AIR_N2: f64 = 0.79;

/// Guards rounding against values that land a hair off an increment.
const ROUNDING_SLACK: f64 = 1e-9;

/// Absolute pressure at `depth`, in atmospheres.
#[must_use]
pub fn ambient_pressure(units: UnitSystem, depth: f64) -> f64 {
    depth / units.depth_per_atm() + 1.0
}

/// Oxygen partial pressure breathed at `depth`.
#[must_use]
pub fn partial_pressure_o2(mixture: &Mixture, units: UnitSystem, depth: f64) -> f64 {
    mixture.f_o2() * ambient_pressure(units, depth)
}

/// Deepest depth at which `mixture` stays within `max_po2`.
///
/// Returns `f64::INFINITY` for a mixture without oxygen.
#[must_use]
pub fn maximum_operating_depth(mixture: &Mixture, units: UnitSystem, max_po2: f64) -> f64 {
    if mixture.f_o2() <= 0.0 {
        return f64::INFINITY;
    }
    round_down(units, depth_at(units, max_po2 / mixture.f_o2()))
}

/// Depth at which air carries the same nitrogen partial pressure.
#[must_use]
pub fn equivalent_air_depth(mixture: &Mixture, units: UnitSystem, depth: f64) -> f64 {
    let ata = ambient_pressure(units, depth) * mixture.f_n2() / AIR_N2;
    round_up(units, depth_at(units, ata))
}

/// Depth at which air is as narcotic as `mixture` at `depth`.
///
/// With `oxygen_is_narcotic`, oxygen counts alongside nitrogen and the
/// reference is all of air; otherwise only nitrogen counts.
#[must_use]
pub fn equivalent_narcotic_depth(
    mixture: &Mixture,
    units: UnitSystem,
    depth: f64,
    oxygen_is_narcotic: bool,
) -> f64 {
    let ata = ambient_pressure(units, depth) * narcotic_fraction(mixture, oxygen_is_narcotic);
    round_up(units, depth_at(units, ata))
}

/// Shallowest depth at which `mixture` still delivers `min_po2`.
///
/// Returns `f64::INFINITY` for a mixture without oxygen.
#[must_use]
pub fn ceiling(mixture: &Mixture, units: UnitSystem, min_po2: f64) -> f64 {
    if mixture.f_o2() <= 0.0 {
        return f64::INFINITY;
    }
    round_up(units, depth_at(units, min_po2 / mixture.f_o2()))
}

/// Leanest-oxygen, least-helium mixture for a dive to `max_depth`.
///
/// Oxygen is the most `max_po2` allows at depth, floored to a whole percent.
/// Helium is the least that keeps the narcotic depth within `max_end`,
/// rounded up to a whole percent.
///
/// # Errors
///
/// Returns [`InvalidMixture`] if the inputs do not describe a breathable
/// mixture, for example a negative partial pressure.
pub fn best_mix(
    units: UnitSystem,
    max_depth: f64,
    max_end: f64,
    max_po2: f64,
    oxygen_is_narcotic: bool,
) -> Result<Mixture, InvalidMixture> {
    let ata = ambient_pressure(units, max_depth);
    let end_ata = ambient_pressure(units, max_end);

    let o2 = floor_slack(100.0 * max_po2 / ata).min(100.0);

    let narcotic = if oxygen_is_narcotic {
        100.0 * end_ata / ata
    } else {
        100.0 * end_ata * AIR_N2 / ata + o2
    };
    let he = ceil_slack(100.0 - narcotic).clamp(0.0, (100.0 - o2).max(0.0));

    Mixture::from_percent(o2, he)
}

fn narcotic_fraction(mixture: &Mixture, oxygen_is_narcotic: bool) -> f64 {
    if oxygen_is_narcotic {
        mixture.f_n2() + mixture.f_o2()
    } else {
        mixture.f_n2() / AIR_N2
    }
}

/// Depth with absolute pressure `ata`.
fn depth_at(units: UnitSystem, ata: f64) -> f64 {
    (ata - 1.0) * units.depth_per_atm()
}

fn round_down(units: UnitSystem, depth: f64) -> f64 {
    let step = units.depth_increment();
    (floor_slack(depth / step) * step).max(0.0)
}

fn round_up(units: UnitSystem, depth: f64) -> f64 {
    let step = units.depth_increment();
    (ceil_slack(depth / step) * step).max(0.0)
}

fn floor_slack(value: f64) -> f64 {
    (value + ROUNDING_SLACK).floor()
}

fn ceil_slack(value: f64) -> f64 {
    (value - ROUNDING_SLACK).ceil()
}
