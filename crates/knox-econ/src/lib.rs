#![deny(warnings)]

//! Economic calculators for nation snapshots.
//!
//! This crate provides:
//! - Half-up rounding matching the game's displayed figures
//! - Static resource tables (continent bonuses, power plants, building profiles)
//! - Daily production, consumption and net revenue per resource
//! - Costs of buying infrastructure, land and cities, with project/policy discounts
//! - Best bid/ask lookup against a market source
//!
//! Every calculator is a pure function of its inputs.

use knox_core::{ParseResourceError, Resource, SourceError, TradeSide, ValidationError};
use serde::Serialize;
use thiserror::Error;

pub mod catalog;
pub mod market;
pub mod production;
pub mod rounding;
pub mod upgrade;

pub use market::{market_info, quote, Quote};
pub use production::{
    food_revenue, manufactured_resource_revenue, manufactured_revenue, raw_resource_revenue,
    raw_revenue, resource_revenue,
};
pub use rounding::{round_half_up, round_half_up_to};
pub use upgrade::{
    city_cost, infrastructure_cost, infrastructure_unit_price, land_cost, land_unit_price,
};

/// Errors produced by the calculators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EconError {
    /// Identifier outside the resource set the operation accepts.
    #[error("{0} is not a valid resource")]
    InvalidResource(String),
    /// The snapshot lacks a field this calculation needs; retry with a richer one.
    #[error("snapshot is missing `{0}` required for this calculation")]
    MalformedSnapshot(&'static str),
    /// The snapshot violates a data-model invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(ValidationError),
    #[error("no {side} offers for {resource}")]
    NoMarketOffers { resource: Resource, side: TradeSide },
    /// Failure from the data source, passed through unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<ValidationError> for EconError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingField(field) => EconError::MalformedSnapshot(field),
            other => EconError::InvalidSnapshot(other),
        }
    }
}

impl From<ParseResourceError> for EconError {
    fn from(e: ParseResourceError) -> Self {
        EconError::InvalidResource(e.0)
    }
}

/// Daily figures for one resource, each rounded half-up to cents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Revenue {
    pub net: f64,
    pub production: f64,
    pub usage: f64,
}

impl Revenue {
    /// Round raw totals; net is computed before rounding.
    pub fn from_totals(production: f64, usage: f64) -> Self {
        Self::rounded(production - usage, production, usage)
    }

    pub fn rounded(net: f64, production: f64, usage: f64) -> Self {
        Self {
            net: round_half_up(net),
            production: round_half_up(production),
            usage: round_half_up(usage),
        }
    }
}

impl From<Revenue> for (f64, f64, f64) {
    fn from(r: Revenue) -> Self {
        (r.net, r.production, r.usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knox_core::NationId;

    #[test]
    fn missing_field_maps_to_malformed_snapshot() {
        let e: EconError = ValidationError::MissingField("cities").into();
        assert_eq!(e, EconError::MalformedSnapshot("cities"));
        let e: EconError = ValidationError::NegativeValue("land").into();
        assert_eq!(
            e,
            EconError::InvalidSnapshot(ValidationError::NegativeValue("land"))
        );
    }

    #[test]
    fn source_errors_pass_through() {
        let e: EconError = SourceError::NationNotFound(NationId(42)).into();
        assert_eq!(e, EconError::Source(SourceError::NationNotFound(NationId(42))));
        assert_eq!(e.to_string(), "no nation exists with nation id 42");
    }

    #[test]
    fn revenue_rounds_each_figure() {
        let r = Revenue::from_totals(10.125, 4.0);
        assert_eq!(r.production, 10.13);
        assert_eq!(r.usage, 4.0);
        assert_eq!(r.net, 6.13);
        let (net, production, usage) = r.into();
        assert_eq!((net, production, usage), (6.13, 10.13, 4.0));
    }
}
