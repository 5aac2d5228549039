//! Static game tables: continent bonus resources, power plants, building
//! profiles per resource and city-planning discounts.

use knox_core::{City, Continent, ManufacturedResource, Projects, RawResource};

/// Marginal bonus rate of farms.
pub const FARM_BONUS_RATE: f64 = 0.0263157894737;
/// Food per farm before land scaling.
pub const FOOD_PER_FARM: f64 = 12.0;
/// Land needed per unit of farm output, reduced by Mass Irrigation.
pub const FARM_LAND_DIVISOR: f64 = 500.0;
pub const MASS_IRRIGATION_LAND_REDUCTION: f64 = 100.0;

/// Raw output per mine or well.
pub const RAW_PER_MINE: f64 = 3.0;
/// Marginal bonus rate of mills, refineries and factories.
pub const MANUFACTURING_BONUS_RATE: f64 = 0.125;

/// Resource Production Center grants this much per two cities.
pub const PRODUCTION_CENTER_PER_TWO_CITIES: f64 = 12.0;
/// Cities counted toward the Resource Production Center bonus.
pub const PRODUCTION_CENTER_CITY_CAP: usize = 10;
/// Nations with this many cities or more lose the bonus.
pub const PRODUCTION_CENTER_CITY_LIMIT: usize = 16;

/// Fuel burned per unit of powered infrastructure.
pub const FUEL_PER_UNIT: f64 = 1.2;

/// Flat per-city discounts of the city-planning projects.
pub const URBAN_PLANNING_DISCOUNT: f64 = 50_000_000.0;
pub const ADVANCED_URBAN_PLANNING_DISCOUNT: f64 = 100_000_000.0;
pub const METROPOLITAN_PLANNING_DISCOUNT: f64 = 150_000_000.0;

/// The three resources a continent's Resource Production Center boosts.
pub fn bonus_resources(continent: Continent) -> [RawResource; 3] {
    use RawResource::*;
    match continent {
        Continent::Africa => [Oil, Bauxite, Uranium],
        Continent::Antarctica => [Oil, Coal, Uranium],
        Continent::Asia => [Oil, Iron, Uranium],
        Continent::Australia => [Coal, Bauxite, Lead],
        Continent::Europe => [Coal, Iron, Lead],
        Continent::NorthAmerica => [Coal, Iron, Uranium],
        Continent::SouthAmerica => [Oil, Bauxite, Lead],
    }
}

/// How a class of power plant burns fuel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerPlant {
    /// Infrastructure one plant can power.
    pub infra_per_plant: f64,
    /// Infrastructure covered by one fuel unit.
    pub infra_per_unit: f64,
}

pub const FOSSIL_PLANT: PowerPlant = PowerPlant {
    infra_per_plant: 500.0,
    infra_per_unit: 100.0,
};

pub const NUCLEAR_PLANT: PowerPlant = PowerPlant {
    infra_per_plant: 2000.0,
    infra_per_unit: 1000.0,
};

/// Project that scales a building's output or intake: the factor is
/// `1 + bonus` when the project is held.
#[derive(Clone, Copy)]
pub struct ProjectBoost {
    pub held: fn(&Projects) -> bool,
    pub bonus: f64,
}

impl ProjectBoost {
    pub fn factor(&self, projects: &Projects) -> f64 {
        1.0 + if (self.held)(projects) { self.bonus } else { 0.0 }
    }
}

/// Manufacturing building that consumes a raw resource.
#[derive(Clone, Copy)]
pub struct Consumer {
    pub buildings: fn(&City) -> u32,
    pub units_per_building: f64,
    pub boost: ProjectBoost,
}

/// Power plants that burn a raw resource.
#[derive(Clone, Copy)]
pub struct Burner {
    pub plants: fn(&City) -> u32,
    pub plant: PowerPlant,
}

/// Everything the calculator needs to know about one raw resource.
#[derive(Clone, Copy)]
pub struct RawProfile {
    pub mines: fn(&City) -> u32,
    pub bonus_rate: f64,
    pub production_boost: Option<ProjectBoost>,
    pub consumer: Option<Consumer>,
    pub burner: Option<Burner>,
}

/// Everything the calculator needs to know about one manufactured resource.
#[derive(Clone, Copy)]
pub struct ManufacturedProfile {
    pub buildings: fn(&City) -> u32,
    pub units_per_building: f64,
    pub boost: ProjectBoost,
}

const RAW_BONUS_RATE: f64 = 0.05555555555;
const URANIUM_BONUS_RATE: f64 = 0.125;

const IRON_WORKS: ProjectBoost = ProjectBoost {
    held: |p| p.iron_works,
    bonus: 0.36,
};
const BAUXITE_WORKS: ProjectBoost = ProjectBoost {
    held: |p| p.bauxite_works,
    bonus: 0.36,
};
const ARMS_STOCKPILE: ProjectBoost = ProjectBoost {
    held: |p| p.arms_stockpile,
    bonus: 0.34,
};
const EMERGENCY_GASOLINE_RESERVE: ProjectBoost = ProjectBoost {
    held: |p| p.emergency_gasoline_reserve,
    bonus: 1.0,
};
const URANIUM_ENRICHMENT: ProjectBoost = ProjectBoost {
    held: |p| p.uranium_enrichment_program,
    bonus: 1.0,
};

// Output boosts differ from the intake boosts for gasoline and munitions.
const GASOLINE_OUTPUT: ProjectBoost = ProjectBoost {
    held: |p| p.emergency_gasoline_reserve,
    bonus: 2.0,
};
const MUNITIONS_OUTPUT: ProjectBoost = ProjectBoost {
    held: |p| p.arms_stockpile,
    bonus: 1.0,
};

pub fn raw_profile(resource: RawResource) -> RawProfile {
    match resource {
        RawResource::Coal => RawProfile {
            mines: |c| c.coal_mines,
            bonus_rate: RAW_BONUS_RATE,
            production_boost: None,
            consumer: Some(Consumer {
                buildings: |c| c.steel_mills,
                units_per_building: 3.0,
                boost: IRON_WORKS,
            }),
            burner: Some(Burner {
                plants: |c| c.coal_power,
                plant: FOSSIL_PLANT,
            }),
        },
        RawResource::Oil => RawProfile {
            mines: |c| c.oil_wells,
            bonus_rate: RAW_BONUS_RATE,
            production_boost: None,
            consumer: Some(Consumer {
                buildings: |c| c.oil_refineries,
                units_per_building: 3.0,
                boost: EMERGENCY_GASOLINE_RESERVE,
            }),
            burner: Some(Burner {
                plants: |c| c.oil_power,
                plant: FOSSIL_PLANT,
            }),
        },
        RawResource::Iron => RawProfile {
            mines: |c| c.iron_mines,
            bonus_rate: RAW_BONUS_RATE,
            production_boost: None,
            consumer: Some(Consumer {
                buildings: |c| c.steel_mills,
                units_per_building: 3.0,
                boost: IRON_WORKS,
            }),
            burner: None,
        },
        RawResource::Lead => RawProfile {
            mines: |c| c.lead_mines,
            bonus_rate: RAW_BONUS_RATE,
            production_boost: None,
            consumer: Some(Consumer {
                buildings: |c| c.munitions_factories,
                units_per_building: 6.0,
                boost: ARMS_STOCKPILE,
            }),
            burner: None,
        },
        RawResource::Bauxite => RawProfile {
            mines: |c| c.bauxite_mines,
            bonus_rate: RAW_BONUS_RATE,
            production_boost: None,
            consumer: Some(Consumer {
                buildings: |c| c.aluminum_refineries,
                units_per_building: 3.0,
                boost: BAUXITE_WORKS,
            }),
            burner: None,
        },
        RawResource::Uranium => RawProfile {
            mines: |c| c.uranium_mines,
            bonus_rate: URANIUM_BONUS_RATE,
            production_boost: Some(URANIUM_ENRICHMENT),
            consumer: None,
            burner: Some(Burner {
                plants: |c| c.nuclear_power,
                plant: NUCLEAR_PLANT,
            }),
        },
    }
}

pub fn manufactured_profile(resource: ManufacturedResource) -> ManufacturedProfile {
    match resource {
        ManufacturedResource::Steel => ManufacturedProfile {
            buildings: |c| c.steel_mills,
            units_per_building: 9.0,
            boost: IRON_WORKS,
        },
        ManufacturedResource::Aluminum => ManufacturedProfile {
            buildings: |c| c.aluminum_refineries,
            units_per_building: 9.0,
            boost: BAUXITE_WORKS,
        },
        ManufacturedResource::Gasoline => ManufacturedProfile {
            buildings: |c| c.oil_refineries,
            units_per_building: 6.0,
            boost: GASOLINE_OUTPUT,
        },
        ManufacturedResource::Munitions => ManufacturedProfile {
            buildings: |c| c.munitions_factories,
            units_per_building: 18.0,
            boost: MUNITIONS_OUTPUT,
        },
    }
}
