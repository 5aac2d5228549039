//! Daily production, consumption and net revenue per resource.

use crate::catalog::{
    bonus_resources, manufactured_profile, raw_profile, Burner, FARM_BONUS_RATE,
    FARM_LAND_DIVISOR, FOOD_PER_FARM, FUEL_PER_UNIT, MANUFACTURING_BONUS_RATE,
    MASS_IRRIGATION_LAND_REDUCTION, PRODUCTION_CENTER_CITY_CAP, PRODUCTION_CENTER_CITY_LIMIT,
    PRODUCTION_CENTER_PER_TWO_CITIES, RAW_PER_MINE,
};
use crate::rounding::round_half_up;
use crate::{EconError, Revenue};
use knox_core::{
    validate_nation, City, Continent, ManufacturedResource, NationSnapshot, RawResource,
    Resource, WorldState,
};
use tracing::debug;

const POPULATION_PER_FOOD: f64 = 1000.0;
const SOLDIERS_PER_FOOD_AT_WAR: f64 = 500.0;
const SOLDIERS_PER_FOOD_AT_PEACE: f64 = 750.0;
const RADIATION_SCALE: f64 = 1000.0;
const FALLOUT_SHELTER_FLOOR: f64 = 0.1;
const ANTARCTIC_FOOD_FACTOR: f64 = 0.5;

/// Multiplier for stacking `buildings` of one kind in a city.
///
/// Each building past the first adds `rate`, rounded to cents. The bonus
/// never drops below zero, so an empty city keeps the base rate.
pub fn marginal_bonus(buildings: u32, rate: f64) -> f64 {
    1.0 + round_half_up((buildings as f64 - 1.0) * rate).max(0.0)
}

/// Seasonal food multiplier for a continent in a given month (1-12).
///
/// Northern continents get a summer boost in June-August and a winter
/// penalty in December-February; southern continents the reverse.
/// Antarctica is halved all year.
pub fn season_multiplier(continent: Continent, month: u32) -> f64 {
    let northern_summer = (6..=8).contains(&month);
    let northern_winter = month == 12 || month <= 2;
    match continent {
        Continent::NorthAmerica | Continent::Europe | Continent::Asia => {
            if northern_summer {
                1.2
            } else if northern_winter {
                0.8
            } else {
                1.0
            }
        }
        Continent::SouthAmerica | Continent::Africa | Continent::Australia => {
            if northern_summer {
                0.8
            } else if northern_winter {
                1.2
            } else {
                1.0
            }
        }
        Continent::Antarctica => ANTARCTIC_FOOD_FACTOR,
    }
}

/// Food multiplier from radiation. Only a Fallout Shelter puts a floor under it.
pub fn radiation_multiplier(continent_radiation: f64, global_radiation: f64, shelter: bool) -> f64 {
    let factor = 1.0 - (continent_radiation + global_radiation) / RADIATION_SCALE;
    if shelter {
        factor.max(FALLOUT_SHELTER_FLOOR)
    } else {
        factor
    }
}

/// Daily food production and usage of a nation.
///
/// Needs population, soldiers, continent and cities (farms and land).
/// Missing war lists count as peace.
pub fn food_revenue(nation: &NationSnapshot, world: &WorldState) -> Result<Revenue, EconError> {
    validate_nation(nation)?;
    let population = nation.population()?;
    let soldiers = nation.soldiers()? as f64;
    let continent = nation.continent()?;
    let cities = nation.cities()?;

    let soldiers_per_food = if nation.at_war() {
        SOLDIERS_PER_FOOD_AT_WAR
    } else {
        SOLDIERS_PER_FOOD_AT_PEACE
    };
    let usage = population / POPULATION_PER_FOOD + soldiers / soldiers_per_food;

    let irrigation = if nation.projects.mass_irrigation {
        MASS_IRRIGATION_LAND_REDUCTION
    } else {
        0.0
    };
    let land_divisor = FARM_LAND_DIVISOR - irrigation;
    let mut production = 0.0;
    for city in cities {
        let mut city_production = city.farms as f64 * FOOD_PER_FARM * (city.land / land_divisor);
        city_production *= marginal_bonus(city.farms, FARM_BONUS_RATE);
        production += city_production;
    }

    let season = season_multiplier(continent, world.month());
    let radiation = radiation_multiplier(
        world.radiation.for_continent(continent),
        world.radiation.global,
        nation.projects.fallout_shelter,
    );
    production *= season * radiation;

    let revenue = Revenue::from_totals(production, usage);
    debug!(nation = %nation.id, season, radiation, ?revenue, "food revenue");
    Ok(revenue)
}

/// Fuel a city's power plants burn, filling plants one at a time until the
/// city's infrastructure is covered. A partly used plant bills whole units.
fn power_usage(city: &City, burner: &Burner) -> f64 {
    let plants = (burner.plants)(city);
    if !city.powered || plants == 0 {
        return 0.0;
    }
    let plant = burner.plant;
    let mut remaining = city.infrastructure;
    let mut usage = 0.0;
    for _ in 0..plants {
        if remaining >= plant.infra_per_plant {
            usage += (plant.infra_per_plant / plant.infra_per_unit) * FUEL_PER_UNIT;
            remaining -= plant.infra_per_plant;
        } else if remaining > 0.0 {
            usage += (remaining / plant.infra_per_unit).ceil() * FUEL_PER_UNIT;
            remaining = 0.0;
        } else {
            break;
        }
    }
    usage
}

/// Flat Resource Production Center bonus, if it applies to `resource`.
fn production_center_bonus(
    nation: &NationSnapshot,
    resource: RawResource,
    city_count: usize,
) -> Result<f64, EconError> {
    if !nation.projects.resource_production_center || city_count >= PRODUCTION_CENTER_CITY_LIMIT {
        return Ok(0.0);
    }
    if !bonus_resources(nation.continent()?).contains(&resource) {
        return Ok(0.0);
    }
    let counted = city_count.min(PRODUCTION_CENTER_CITY_CAP) as f64;
    Ok((counted / 2.0).ceil() * PRODUCTION_CENTER_PER_TWO_CITIES)
}

/// Daily production and usage of a raw resource.
///
/// Usage covers both manufacturing intake (mills, refineries, factories)
/// and power plants. Needs cities; continent only when the nation holds a
/// Resource Production Center.
pub fn raw_revenue(nation: &NationSnapshot, resource: RawResource) -> Result<Revenue, EconError> {
    validate_nation(nation)?;
    let cities = nation.cities()?;
    let profile = raw_profile(resource);
    let projects = &nation.projects;

    let mut production = production_center_bonus(nation, resource, cities.len())?;
    let mut mill_usage = 0.0;
    let mut power = 0.0;
    for city in cities {
        let mines = (profile.mines)(city);
        let mut city_production = mines as f64 * RAW_PER_MINE;
        let boost = profile
            .production_boost
            .map_or(1.0, |boost| boost.factor(projects));
        city_production *= boost * marginal_bonus(mines, profile.bonus_rate);
        production += city_production;

        if let Some(consumer) = &profile.consumer {
            let buildings = (consumer.buildings)(city);
            let mut city_mill = buildings as f64 * consumer.units_per_building;
            city_mill *= marginal_bonus(buildings, MANUFACTURING_BONUS_RATE)
                * consumer.boost.factor(projects);
            mill_usage += city_mill;
        }
        if let Some(burner) = &profile.burner {
            power += power_usage(city, burner);
        }
    }

    let revenue = Revenue::rounded(
        production - mill_usage - power,
        production,
        mill_usage + power,
    );
    debug!(nation = %nation.id, %resource, mill_usage, power, ?revenue, "raw revenue");
    Ok(revenue)
}

/// [`raw_revenue`] for a resource named by string.
pub fn raw_resource_revenue(nation: &NationSnapshot, resource: &str) -> Result<Revenue, EconError> {
    raw_revenue(nation, resource.parse()?)
}

/// Daily production of a manufactured resource. Only powered cities produce.
pub fn manufactured_revenue(
    nation: &NationSnapshot,
    resource: ManufacturedResource,
) -> Result<f64, EconError> {
    validate_nation(nation)?;
    let cities = nation.cities()?;
    let profile = manufactured_profile(resource);
    let boost = profile.boost.factor(&nation.projects);

    let mut production = 0.0;
    for city in cities.iter().filter(|c| c.powered) {
        let buildings = (profile.buildings)(city);
        production += buildings as f64
            * profile.units_per_building
            * marginal_bonus(buildings, MANUFACTURING_BONUS_RATE)
            * boost;
    }

    let production = round_half_up(production);
    debug!(nation = %nation.id, %resource, production, "manufactured revenue");
    Ok(production)
}

/// [`manufactured_revenue`] for a resource named by string.
pub fn manufactured_resource_revenue(
    nation: &NationSnapshot,
    resource: &str,
) -> Result<f64, EconError> {
    manufactured_revenue(nation, resource.parse()?)
}

/// Revenue of any resource. Manufactured resources are not consumed by
/// any modeled building, so their usage is zero and net equals production.
/// `world` is only needed for food.
pub fn resource_revenue(
    nation: &NationSnapshot,
    world: Option<&WorldState>,
    resource: Resource,
) -> Result<Revenue, EconError> {
    if resource == Resource::Food {
        let world = world.ok_or(EconError::MalformedSnapshot("world_state"))?;
        return food_revenue(nation, world);
    }
    if let Ok(raw) = RawResource::try_from(resource) {
        return raw_revenue(nation, raw);
    }
    let production = manufactured_revenue(nation, ManufacturedResource::try_from(resource)?)?;
    Ok(Revenue {
        net: production,
        production,
        usage: 0.0,
    })
}
