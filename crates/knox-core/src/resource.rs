//! Closed set of tradable resources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier that is not one of the game's resources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0} is not a valid resource")]
pub struct ParseResourceError(pub String);

/// Every resource traded on the in-game market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Food,
    Coal,
    Oil,
    Iron,
    Lead,
    Bauxite,
    Uranium,
    Steel,
    Aluminum,
    Gasoline,
    Munitions,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::Food,
        Resource::Coal,
        Resource::Oil,
        Resource::Iron,
        Resource::Lead,
        Resource::Bauxite,
        Resource::Uranium,
        Resource::Steel,
        Resource::Aluminum,
        Resource::Gasoline,
        Resource::Munitions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Coal => "coal",
            Resource::Oil => "oil",
            Resource::Iron => "iron",
            Resource::Lead => "lead",
            Resource::Bauxite => "bauxite",
            Resource::Uranium => "uranium",
            Resource::Steel => "steel",
            Resource::Aluminum => "aluminum",
            Resource::Gasoline => "gasoline",
            Resource::Munitions => "munitions",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ParseResourceError;

    /// Case-insensitive; the error keeps the identifier as given.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == key)
            .ok_or_else(|| ParseResourceError(s.to_string()))
    }
}

/// Resources extracted by mines and wells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawResource {
    Coal,
    Oil,
    Iron,
    Lead,
    Bauxite,
    Uranium,
}

impl RawResource {
    pub const ALL: [RawResource; 6] = [
        RawResource::Coal,
        RawResource::Oil,
        RawResource::Iron,
        RawResource::Lead,
        RawResource::Bauxite,
        RawResource::Uranium,
    ];
}

/// Resources produced by mills, refineries and factories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManufacturedResource {
    Steel,
    Aluminum,
    Gasoline,
    Munitions,
}

impl ManufacturedResource {
    pub const ALL: [ManufacturedResource; 4] = [
        ManufacturedResource::Steel,
        ManufacturedResource::Aluminum,
        ManufacturedResource::Gasoline,
        ManufacturedResource::Munitions,
    ];
}

impl From<RawResource> for Resource {
    fn from(r: RawResource) -> Self {
        match r {
            RawResource::Coal => Resource::Coal,
            RawResource::Oil => Resource::Oil,
            RawResource::Iron => Resource::Iron,
            RawResource::Lead => Resource::Lead,
            RawResource::Bauxite => Resource::Bauxite,
            RawResource::Uranium => Resource::Uranium,
        }
    }
}

impl From<ManufacturedResource> for Resource {
    fn from(r: ManufacturedResource) -> Self {
        match r {
            ManufacturedResource::Steel => Resource::Steel,
            ManufacturedResource::Aluminum => Resource::Aluminum,
            ManufacturedResource::Gasoline => Resource::Gasoline,
            ManufacturedResource::Munitions => Resource::Munitions,
        }
    }
}

impl TryFrom<Resource> for RawResource {
    type Error = ParseResourceError;

    fn try_from(r: Resource) -> Result<Self, Self::Error> {
        RawResource::ALL
            .into_iter()
            .find(|raw| Resource::from(*raw) == r)
            .ok_or_else(|| ParseResourceError(r.to_string()))
    }
}

impl TryFrom<Resource> for ManufacturedResource {
    type Error = ParseResourceError;

    fn try_from(r: Resource) -> Result<Self, Self::Error> {
        ManufacturedResource::ALL
            .into_iter()
            .find(|m| Resource::from(*m) == r)
            .ok_or_else(|| ParseResourceError(r.to_string()))
    }
}

impl FromStr for RawResource {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Resource>()
            .and_then(RawResource::try_from)
            .map_err(|_| ParseResourceError(s.to_string()))
    }
}

impl FromStr for ManufacturedResource {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Resource>()
            .and_then(ManufacturedResource::try_from)
            .map_err(|_| ParseResourceError(s.to_string()))
    }
}

impl fmt::Display for RawResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Resource::from(*self).fmt(f)
    }
}

impl fmt::Display for ManufacturedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Resource::from(*self).fmt(f)
    }
}
