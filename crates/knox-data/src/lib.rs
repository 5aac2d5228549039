#![deny(warnings)]

//! File-backed data source: JSON snapshots under a data directory.
//!
//! Layout:
//! - `world.json`: the game-wide [`WorldState`]
//! - `nations/<id>.json`: one [`NationSnapshot`] per nation (partial records allowed)
//! - `market.json`: open offers per resource, `{"steel": {"buy": [...], "sell": [...]}}`

use knox_core::{
    validate_nation, validate_world_state, MarketSource, NationId, NationSnapshot, NationSource,
    Resource, SourceError, TradeSide, WorldSource, WorldState,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Open offers on both sides of one resource's market.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderBook {
    pub buy: Vec<Decimal>,
    pub sell: Vec<Decimal>,
}

impl OrderBook {
    /// Highest buy offer or lowest sell offer.
    pub fn best(&self, side: TradeSide) -> Option<Decimal> {
        match side {
            TradeSide::Buy => self.buy.iter().max().copied(),
            TradeSide::Sell => self.sell.iter().min().copied(),
        }
    }
}

/// Reads snapshots from a directory on every call; nothing is cached.
#[derive(Clone, Debug)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn nation_path(&self, id: NationId) -> PathBuf {
        self.root.join("nations").join(format!("{id}.json"))
    }

    pub fn world_path(&self) -> PathBuf {
        self.root.join("world.json")
    }

    pub fn market_path(&self) -> PathBuf {
        self.root.join("market.json")
    }

    /// Parse a JSON file; `Ok(None)` when the file does not exist.
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, SourceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable snapshot");
                return Err(SourceError::Unavailable(format!("{}: {e}", path.display())));
            }
        };
        debug!(path = %path.display(), bytes = text.len(), "loaded snapshot");
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| SourceError::Malformed(format!("{}: {e}", path.display())))
    }

    fn market(&self) -> Result<HashMap<Resource, OrderBook>, SourceError> {
        let path = self.market_path();
        self.read(&path)?
            .ok_or_else(|| SourceError::Unavailable(format!("{} not found", path.display())))
    }
}

impl NationSource for JsonStore {
    fn nation(&self, id: NationId) -> Result<NationSnapshot, SourceError> {
        let nation: NationSnapshot = self
            .read(&self.nation_path(id))?
            .ok_or(SourceError::NationNotFound(id))?;
        if nation.id != id {
            return Err(SourceError::Malformed(format!(
                "file for nation {id} holds nation {}",
                nation.id
            )));
        }
        validate_nation(&nation).map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(nation)
    }
}

impl WorldSource for JsonStore {
    fn world_state(&self) -> Result<WorldState, SourceError> {
        let path = self.world_path();
        let world: WorldState = self
            .read(&path)?
            .ok_or_else(|| SourceError::Unavailable(format!("{} not found", path.display())))?;
        validate_world_state(&world).map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(world)
    }
}

impl MarketSource for JsonStore {
    fn best_offer(&self, resource: Resource, side: TradeSide) -> Result<Option<Decimal>, SourceError> {
        Ok(self.market()?.get(&resource).and_then(|book| book.best(side)))
    }
}
