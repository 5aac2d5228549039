//! Seams to the data-fetch layer.
//!
//! The calculators never fetch anything themselves; callers resolve ids into
//! snapshots through these traits and hand the snapshots over.

use crate::{NationId, NationSnapshot, Resource, WorldState};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Failures reported by a data source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("no nation exists with nation id {0}")]
    NationNotFound(NationId),
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Side of the market an offer sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeSide {
    /// Offers to buy; the best is the highest price.
    Buy,
    /// Offers to sell; the best is the lowest price.
    Sell,
}

impl TradeSide {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves nation ids into snapshots.
pub trait NationSource {
    fn nation(&self, id: NationId) -> Result<NationSnapshot, SourceError>;
}

/// Supplies the game-wide state.
pub trait WorldSource {
    fn world_state(&self) -> Result<WorldState, SourceError>;
}

/// Supplies the best open offer on one side of a resource's market,
/// or `None` when that side has no offers.
pub trait MarketSource {
    fn best_offer(&self, resource: Resource, side: TradeSide)
        -> Result<Option<Decimal>, SourceError>;
}
