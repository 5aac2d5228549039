#![deny(warnings)]

//! Core domain models and invariants for the Knox economy tools.
//!
//! This crate defines the serializable snapshot types handed to the
//! calculators, the closed set of tradable resources, and the traits the
//! data-fetch layer implements. Snapshots may be partial: fields a
//! particular calculation does not need are allowed to be absent.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod resource;
mod source;

pub use resource::{ManufacturedResource, ParseResourceError, RawResource, Resource};
pub use source::{MarketSource, NationSource, SourceError, TradeSide, WorldSource};

/// Game-assigned nation identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NationId(pub u64);

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven continents a nation can be founded on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    #[serde(rename = "na")]
    NorthAmerica,
    #[serde(rename = "sa")]
    SouthAmerica,
    #[serde(rename = "eu")]
    Europe,
    #[serde(rename = "af")]
    Africa,
    #[serde(rename = "as")]
    Asia,
    #[serde(rename = "au")]
    Australia,
    #[serde(rename = "an")]
    Antarctica,
}

/// Nation-wide domestic policy. Discriminants are the game's policy indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomesticPolicy {
    ManifestDestiny = 1,
    OpenMarkets = 2,
    TechnologicalAdvancement = 3,
    Imperialism = 4,
    Urbanization = 5,
    RapidExpansion = 6,
}

impl DomesticPolicy {
    /// Policy for a game index, if the index is known.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::ManifestDestiny),
            2 => Some(Self::OpenMarkets),
            3 => Some(Self::TechnologicalAdvancement),
            4 => Some(Self::Imperialism),
            5 => Some(Self::Urbanization),
            6 => Some(Self::RapidExpansion),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// An active war from one side's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct War {
    /// Turns until the war expires; > 0 means hostilities are ongoing.
    pub turns_left: i32,
}

/// National projects that modify the economy formulas. Absent flags are false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projects {
    /// Mass Irrigation: farms need 400 land per unit instead of 500.
    #[serde(alias = "massirr")]
    pub mass_irrigation: bool,
    /// Fallout Shelter: food radiation penalty never drops below 10%.
    pub fallout_shelter: bool,
    /// Resource Production Center: flat bonus on continent resources.
    pub resource_production_center: bool,
    pub uranium_enrichment_program: bool,
    pub iron_works: bool,
    pub bauxite_works: bool,
    pub arms_stockpile: bool,
    pub emergency_gasoline_reserve: bool,
    pub urban_planning: bool,
    pub advanced_urban_planning: bool,
    pub metropolitan_planning: bool,
    pub government_support_agency: bool,
    pub center_for_civil_engineering: bool,
    pub advanced_engineering_corps: bool,
    pub arable_land_agency: bool,
}

/// Improvements and development of one city. Absent counts are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(alias = "farm")]
    pub farms: u32,
    #[serde(alias = "coal_mine")]
    pub coal_mines: u32,
    #[serde(alias = "oil_well")]
    pub oil_wells: u32,
    #[serde(alias = "iron_mine")]
    pub iron_mines: u32,
    #[serde(alias = "lead_mine")]
    pub lead_mines: u32,
    #[serde(alias = "bauxite_mine")]
    pub bauxite_mines: u32,
    #[serde(alias = "uranium_mine")]
    pub uranium_mines: u32,
    #[serde(alias = "gasrefinery")]
    pub oil_refineries: u32,
    #[serde(alias = "steel_mill")]
    pub steel_mills: u32,
    #[serde(alias = "aluminum_refinery")]
    pub aluminum_refineries: u32,
    #[serde(alias = "munitions_factory")]
    pub munitions_factories: u32,
    pub coal_power: u32,
    pub oil_power: u32,
    pub nuclear_power: u32,
    /// Land area (>= 0).
    pub land: f64,
    /// Infrastructure level (>= 0).
    pub infrastructure: f64,
    pub powered: bool,
}

/// One nation at query time. Only the fields the invoked calculator needs
/// have to be populated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NationSnapshot {
    pub id: NationId,
    #[serde(default, alias = "nation_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soldiers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defensive_wars: Option<Vec<War>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offensive_wars: Option<Vec<War>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domestic_policy: Option<DomesticPolicy>,
    #[serde(flatten)]
    pub projects: Projects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<City>>,
}

impl NationSnapshot {
    pub fn cities(&self) -> Result<&[City], ValidationError> {
        self.cities
            .as_deref()
            .ok_or(ValidationError::MissingField("cities"))
    }

    pub fn population(&self) -> Result<f64, ValidationError> {
        self.population
            .ok_or(ValidationError::MissingField("population"))
    }

    pub fn soldiers(&self) -> Result<u64, ValidationError> {
        self.soldiers.ok_or(ValidationError::MissingField("soldiers"))
    }

    pub fn continent(&self) -> Result<Continent, ValidationError> {
        self.continent
            .ok_or(ValidationError::MissingField("continent"))
    }

    /// True when any offensive or defensive war still has turns left.
    /// Absent war lists count as no wars.
    pub fn at_war(&self) -> bool {
        self.defensive_wars
            .iter()
            .chain(self.offensive_wars.iter())
            .flatten()
            .any(|w| w.turns_left > 0)
    }

    pub fn has_policy(&self, policy: DomesticPolicy) -> bool {
        self.domestic_policy == Some(policy)
    }
}

/// Radiation levels per continent plus the global addend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Radiation {
    pub africa: f64,
    pub antarctica: f64,
    pub asia: f64,
    pub australia: f64,
    pub europe: f64,
    pub north_america: f64,
    pub south_america: f64,
    #[serde(alias = "global_")]
    pub global: f64,
}

impl Radiation {
    /// Radiation of a single continent, without the global addend.
    pub fn for_continent(&self, continent: Continent) -> f64 {
        match continent {
            Continent::Africa => self.africa,
            Continent::Antarctica => self.antarctica,
            Continent::Asia => self.asia,
            Continent::Australia => self.australia,
            Continent::Europe => self.europe,
            Continent::NorthAmerica => self.north_america,
            Continent::SouthAmerica => self.south_america,
        }
    }
}

/// Game-wide state shared by every nation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Current in-game date.
    pub game_date: NaiveDate,
    #[serde(default)]
    pub radiation: Radiation,
}

impl WorldState {
    /// In-game month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.game_date.month()
    }
}

/// Validation errors for snapshot invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field required by the requested calculation is absent.
    #[error("snapshot is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("non-finite value in `{0}`")]
    NonFinite(&'static str),
    #[error("negative value in `{0}`")]
    NegativeValue(&'static str),
}

fn check_amount(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue(field));
    }
    Ok(())
}

/// Validate a city: land and infrastructure must be finite and non-negative.
pub fn validate_city(city: &City) -> Result<(), ValidationError> {
    check_amount(city.land, "land")?;
    check_amount(city.infrastructure, "infrastructure")?;
    Ok(())
}

/// Validate whichever nation fields are present.
pub fn validate_nation(nation: &NationSnapshot) -> Result<(), ValidationError> {
    if let Some(population) = nation.population {
        check_amount(population, "population")?;
    }
    for city in nation.cities.iter().flatten() {
        validate_city(city)?;
    }
    Ok(())
}

/// Validate radiation levels; every value must be finite.
pub fn validate_world_state(world: &WorldState) -> Result<(), ValidationError> {
    let r = &world.radiation;
    for (value, field) in [
        (r.africa, "radiation.africa"),
        (r.antarctica, "radiation.antarctica"),
        (r.asia, "radiation.asia"),
        (r.australia, "radiation.australia"),
        (r.europe, "radiation.europe"),
        (r.north_america, "radiation.north_america"),
        (r.south_america, "radiation.south_america"),
        (r.global, "radiation.global"),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite(field));
        }
    }
    Ok(())
}
