//! Costs of buying infrastructure, land and cities.
//!
//! Infrastructure and land are priced in bands: the unit price is evaluated
//! at the start of each band and applied to the whole band. A purchase that
//! is not a whole number of bands buys the remainder first. Selling back
//! refunds a flat rate per unit.

use crate::catalog::{
    ADVANCED_URBAN_PLANNING_DISCOUNT, METROPOLITAN_PLANNING_DISCOUNT, URBAN_PLANNING_DISCOUNT,
};
use crate::rounding::round_half_up;
use knox_core::{DomesticPolicy, NationSnapshot};
use tracing::trace;

const INFRA_BAND: f64 = 100.0;
const INFRA_REFUND_PER_UNIT: f64 = 150.0;
const LAND_BAND: f64 = 500.0;
const LAND_REFUND_PER_UNIT: f64 = 50.0;

const CORPS_FACTOR: f64 = 0.90;
const AGENCY_FACTOR: f64 = 0.95;
const POLICY_FACTOR: f64 = 0.95;
const SUPPORTED_POLICY_FACTOR: f64 = 0.925;

/// Price of one unit of infrastructure bought at `level`.
pub fn infrastructure_unit_price(level: f64) -> f64 {
    ((level - 10.0).abs().powf(2.2) / 710.0) + 300.0
}

/// Price of one unit of land bought at `level`.
pub fn land_unit_price(level: f64) -> f64 {
    (0.002 * (level - 20.0) * (level - 20.0)) + 50.0
}

/// Undiscounted cost of moving from `start` to `end` in bands of `band`
/// units. Negative when `end < start`.
///
/// Levels too large for cent precision cannot be split into bands; the
/// rest of the span is then priced at the current band.
fn banded_cost(start: f64, end: f64, band: f64, refund: f64, unit_price: fn(f64) -> f64) -> f64 {
    let end = round_half_up(end);
    let mut start = round_half_up(start);
    let mut cost = 0.0;
    loop {
        // levels are whole cents; strip float noise so bands split exactly
        let difference = round_half_up(end - start);
        if difference < 0.0 {
            return cost + refund * difference;
        }
        let price = round_half_up(unit_price(start));
        if difference <= band {
            return cost + price * difference;
        }
        let remainder = difference % band;
        let step = if remainder == 0.0 { band } else { remainder };
        let next = round_half_up(start + step);
        if next <= start || next >= end {
            trace!(start, end, price, "band too small to represent");
            return cost + price * difference;
        }
        trace!(start, step, price, "band");
        cost += price * step;
        start = next;
    }
}

/// Combined project and policy discount on a positive purchase.
///
/// `corps` wins over `agency`; the policy discount stacks on top and
/// deepens when the Government Support Agency is also held.
fn discount(nation: &NationSnapshot, agency: bool, policy: DomesticPolicy) -> f64 {
    let projects = &nation.projects;
    let mut modifier = 1.0;
    if projects.advanced_engineering_corps {
        modifier *= CORPS_FACTOR;
    } else if agency {
        modifier *= AGENCY_FACTOR;
    }
    if nation.has_policy(policy) {
        modifier *= if projects.government_support_agency {
            SUPPORTED_POLICY_FACTOR
        } else {
            POLICY_FACTOR
        };
    }
    modifier
}

/// Cost of raising infrastructure from `start` to `end`.
///
/// A nation, when given, applies Advanced Engineering Corps or Center for
/// Civil Engineering and the Urbanization policy. Downgrades are refunds
/// at a flat 150 per unit and never discounted.
///
/// Example:
/// assert_eq!(infrastructure_cost(50.0, 40.0, None), -1500.0);
pub fn infrastructure_cost(start: f64, end: f64, nation: Option<&NationSnapshot>) -> f64 {
    let mut cost = banded_cost(
        start,
        end,
        INFRA_BAND,
        INFRA_REFUND_PER_UNIT,
        infrastructure_unit_price,
    );
    if let Some(nation) = nation {
        if cost > 0.0 {
            cost *= discount(
                nation,
                nation.projects.center_for_civil_engineering,
                DomesticPolicy::Urbanization,
            );
        }
    }
    round_half_up(cost)
}

/// Cost of raising land from `start` to `end`.
///
/// Same banding as infrastructure with 500-unit bands and a 50 per unit
/// refund. Discounts come from Advanced Engineering Corps or Arable Land
/// Agency and the Rapid Expansion policy.
pub fn land_cost(start: f64, end: f64, nation: Option<&NationSnapshot>) -> f64 {
    let mut cost = banded_cost(start, end, LAND_BAND, LAND_REFUND_PER_UNIT, land_unit_price);
    if let Some(nation) = nation {
        if cost > 0.0 {
            cost *= discount(
                nation,
                nation.projects.arable_land_agency,
                DomesticPolicy::RapidExpansion,
            );
        }
    }
    round_half_up(cost)
}

/// Base price of buying city number `index + 1` while holding `index` cities.
pub fn next_city_price(index: i64) -> f64 {
    let i = index as f64;
    50_000.0 * (i - 1.0).powi(3) + 150_000.0 * i + 75_000.0
}

/// Flat per-city discount of the highest city-planning tier held. Each
/// tier includes the discounts of the tiers below it.
fn planning_discount(nation: &NationSnapshot) -> f64 {
    let projects = &nation.projects;
    if projects.metropolitan_planning {
        METROPOLITAN_PLANNING_DISCOUNT + ADVANCED_URBAN_PLANNING_DISCOUNT + URBAN_PLANNING_DISCOUNT
    } else if projects.advanced_urban_planning {
        ADVANCED_URBAN_PLANNING_DISCOUNT + URBAN_PLANNING_DISCOUNT
    } else if projects.urban_planning {
        URBAN_PLANNING_DISCOUNT
    } else {
        0.0
    }
}

/// Cost of growing from `start_city` to `end_city` cities.
///
/// Each city is priced individually; planning projects subtract a flat
/// amount per city and Manifest Destiny scales what remains. The total
/// never goes below zero, and `end_city <= start_city` costs nothing.
///
/// Example:
/// assert_eq!(city_cost(10, 5, None), 0.0);
pub fn city_cost(start_city: i64, end_city: i64, nation: Option<&NationSnapshot>) -> f64 {
    let mut total = 0.0;
    for index in start_city..end_city {
        let mut price = next_city_price(index);
        if let Some(nation) = nation {
            price -= planning_discount(nation);
            if nation.has_policy(DomesticPolicy::ManifestDestiny) {
                price *= if nation.projects.government_support_agency {
                    SUPPORTED_POLICY_FACTOR
                } else {
                    POLICY_FACTOR
                };
            }
        }
        total += price;
    }
    if total > 0.0 {
        round_half_up(total)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nation() -> NationSnapshot {
        NationSnapshot::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn unit_prices() {
        assert_eq!(infrastructure_unit_price(10.0), 300.0);
        assert!(close(infrastructure_unit_price(110.0), 100f64.powf(2.2) / 710.0 + 300.0));
        assert_eq!(land_unit_price(20.0), 50.0);
        assert_eq!(land_unit_price(520.0), 550.0);
    }

    #[test]
    fn single_band_uses_start_price() {
        // round(price(10)) = 300.00
        assert_eq!(infrastructure_cost(10.0, 60.0, None), 15_000.0);
        assert_eq!(land_cost(20.0, 520.0, None), 25_000.0);
    }

    #[test]
    fn downgrade_is_flat_refund() {
        assert_eq!(infrastructure_cost(50.0, 40.0, None), -1500.0);
        assert_eq!(land_cost(600.0, 500.0, None), -5000.0);
        let mut n = nation();
        n.projects.advanced_engineering_corps = true;
        assert_eq!(infrastructure_cost(50.0, 40.0, Some(&n)), -1500.0);
    }

    #[test]
    fn remainder_band_is_bought_first() {
        let a = 10.0;
        let whole = infrastructure_cost(a, a + 250.0, None);
        let parts = infrastructure_cost(a, a + 50.0, None)
            + infrastructure_cost(a + 50.0, a + 150.0, None)
            + infrastructure_cost(a + 150.0, a + 250.0, None);
        assert!(close(whole, parts), "{whole} != {parts}");
    }

    #[test]
    fn whole_bands_split_at_band_edges() {
        let a = 1000.0;
        let whole = infrastructure_cost(a, a + 300.0, None);
        let parts = infrastructure_cost(a, a + 100.0, None)
            + infrastructure_cost(a + 100.0, a + 200.0, None)
            + infrastructure_cost(a + 200.0, a + 300.0, None);
        assert!(close(whole, parts), "{whole} != {parts}");
        let land = land_cost(100.0, 1600.0, None);
        let land_parts = land_cost(100.0, 600.0, None)
            + land_cost(600.0, 1100.0, None)
            + land_cost(1100.0, 1600.0, None);
        assert!(close(land, land_parts), "{land} != {land_parts}");
    }

    #[test]
    fn fractional_levels_are_rounded_to_cents() {
        assert_eq!(
            infrastructure_cost(10.004, 60.001, None),
            infrastructure_cost(10.0, 60.0, None)
        );
    }

    #[test]
    fn engineering_discounts_are_exclusive_and_policy_stacks() {
        let base = infrastructure_cost(10.0, 60.0, None);
        let mut n = nation();
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), base);

        n.projects.center_for_civil_engineering = true;
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), 14_250.0);
        n.projects.advanced_engineering_corps = true;
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), 13_500.0);

        n.domestic_policy = Some(DomesticPolicy::Urbanization);
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), 12_825.0);
        n.projects.government_support_agency = true;
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), 12_487.5);

        n.domestic_policy = Some(DomesticPolicy::RapidExpansion);
        assert_eq!(infrastructure_cost(10.0, 60.0, Some(&n)), 13_500.0);
    }

    #[test]
    fn land_discounts() {
        let mut n = nation();
        n.projects.arable_land_agency = true;
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 23_750.0);
        n.domestic_policy = Some(DomesticPolicy::RapidExpansion);
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 22_562.5);
        n.projects.center_for_civil_engineering = true;
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 22_562.5);
        n.domestic_policy = Some(DomesticPolicy::Urbanization);
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 23_750.0);
    }

    #[test]
    fn engineering_corps_overrides_arable_land_agency() {
        let mut n = nation();
        n.projects.arable_land_agency = true;
        n.projects.advanced_engineering_corps = true;
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 22_500.0);
        n.domestic_policy = Some(DomesticPolicy::RapidExpansion);
        n.projects.government_support_agency = true;
        // 25_000 * 0.90 * 0.925
        assert_eq!(land_cost(20.0, 520.0, Some(&n)), 20_812.5);
        assert_eq!(land_cost(520.0, 20.0, Some(&n)), -25_000.0);
    }

    #[test]
    fn huge_levels_still_terminate() {
        for start in [1e15, 1e17, 1e18, 1e19] {
            let infra = infrastructure_cost(start, start + 1000.0, None);
            assert!(infra.is_finite() && infra >= 0.0, "{start}: {infra}");
            let land = land_cost(start, start + 5000.0, None);
            assert!(land.is_finite() && land >= 0.0, "{start}: {land}");
        }
    }

    #[test]
    fn city_prices() {
        // city 1 -> 2: 50k * 0 + 150k + 75k
        assert_eq!(city_cost(1, 2, None), 225_000.0);
        // city 10 -> 11: 50k * 729 + 1.5M + 75k
        assert_eq!(city_cost(10, 11, None), 38_025_000.0);
        assert_eq!(
            city_cost(10, 12, None),
            next_city_price(10) + next_city_price(11)
        );
    }

    #[test]
    fn shrinking_city_count_costs_nothing() {
        assert_eq!(city_cost(10, 5, None), 0.0);
        assert_eq!(city_cost(10, 10, None), 0.0);
    }

    #[test]
    fn planning_tiers_accumulate() {
        let mut n = nation();
        n.projects.urban_planning = true;
        assert_eq!(city_cost(20, 21, Some(&n)), next_city_price(20) - 50_000_000.0);
        n.projects.advanced_urban_planning = true;
        assert_eq!(city_cost(20, 21, Some(&n)), next_city_price(20) - 150_000_000.0);
        n.projects.metropolitan_planning = true;
        assert_eq!(city_cost(30, 31, Some(&n)), next_city_price(30) - 300_000_000.0);
        // discounts larger than the price floor the total at zero
        assert_eq!(city_cost(5, 8, Some(&n)), 0.0);
    }

    #[test]
    fn manifest_destiny_scales_city_price() {
        let mut n = nation();
        n.domestic_policy = Some(DomesticPolicy::ManifestDestiny);
        assert_eq!(city_cost(10, 11, Some(&n)), 36_123_750.0);
        n.projects.government_support_agency = true;
        assert_eq!(city_cost(10, 11, Some(&n)), 35_173_125.0);
        n.domestic_policy = Some(DomesticPolicy::Urbanization);
        assert_eq!(city_cost(10, 11, Some(&n)), 38_025_000.0);
    }

    proptest! {
        #[test]
        fn upgrades_cost_at_least_the_cheapest_unit(start in 0u32..3000, span in 1u32..2000) {
            let start = start as f64;
            let end = start + span as f64;
            let cost = infrastructure_cost(start, end, None);
            prop_assert!(cost >= 300.0 * span as f64 - 1e-6);
        }

        #[test]
        fn discounts_never_raise_cost(start in 0u32..3000, span in 1u32..2000) {
            let start = start as f64;
            let end = start + span as f64;
            let mut n = nation();
            n.projects.advanced_engineering_corps = true;
            n.projects.government_support_agency = true;
            n.domestic_policy = Some(DomesticPolicy::Urbanization);
            prop_assert!(infrastructure_cost(start, end, Some(&n)) <= infrastructure_cost(start, end, None));
            n.domestic_policy = Some(DomesticPolicy::RapidExpansion);
            prop_assert!(land_cost(start, end, Some(&n)) <= land_cost(start, end, None));
        }

        #[test]
        fn city_cost_is_never_negative(start in 0i64..60, end in 0i64..60) {
            let mut n = nation();
            n.projects.metropolitan_planning = true;
            prop_assert!(city_cost(start, end, Some(&n)) >= 0.0);
            prop_assert!(city_cost(start, end, None) >= 0.0);
        }
    }
}
