//! Best bid/ask for a resource.

use crate::EconError;
use knox_core::{MarketSource, Resource, TradeSide};
use rust_decimal::Decimal;
use serde::Serialize;

/// Best open offers for one resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub resource: Resource,
    /// Highest price anyone currently offers to buy at.
    pub best_buy: Decimal,
    /// Lowest price anyone currently offers to sell at.
    pub best_sell: Decimal,
}

impl Quote {
    /// Ask minus bid; negative when the book is crossed.
    pub fn spread(&self) -> Decimal {
        self.best_sell - self.best_buy
    }
}

pub fn quote<M: MarketSource + ?Sized>(market: &M, resource: Resource) -> Result<Quote, EconError> {
    let best = |side: TradeSide| -> Result<Decimal, EconError> {
        market
            .best_offer(resource, side)?
            .ok_or(EconError::NoMarketOffers { resource, side })
    };
    Ok(Quote {
        resource,
        best_buy: best(TradeSide::Buy)?,
        best_sell: best(TradeSide::Sell)?,
    })
}

/// [`quote`] for a resource named by string; any of the eleven market
/// resources is accepted.
pub fn market_info<M: MarketSource + ?Sized>(market: &M, resource: &str) -> Result<Quote, EconError> {
    quote(market, resource.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knox_core::SourceError;
    use std::collections::HashMap;

    struct Book(HashMap<(Resource, TradeSide), Decimal>);

    impl MarketSource for Book {
        fn best_offer(
            &self,
            resource: Resource,
            side: TradeSide,
        ) -> Result<Option<Decimal>, SourceError> {
            Ok(self.0.get(&(resource, side)).copied())
        }
    }

    struct Offline;

    impl MarketSource for Offline {
        fn best_offer(&self, _: Resource, _: TradeSide) -> Result<Option<Decimal>, SourceError> {
            Err(SourceError::Unavailable("market closed".into()))
        }
    }

    fn book() -> Book {
        let mut m = HashMap::new();
        m.insert((Resource::Steel, TradeSide::Buy), Decimal::new(3_150, 0));
        m.insert((Resource::Steel, TradeSide::Sell), Decimal::new(3_275, 0));
        m.insert((Resource::Food, TradeSide::Buy), Decimal::new(9_850, 2));
        Book(m)
    }

    #[test]
    fn quotes_both_sides() {
        let q = market_info(&book(), "steel").unwrap();
        assert_eq!(q.best_buy, Decimal::new(3_150, 0));
        assert_eq!(q.best_sell, Decimal::new(3_275, 0));
        assert_eq!(q.spread(), Decimal::new(125, 0));
    }

    #[test]
    fn empty_side_is_reported() {
        assert_eq!(
            market_info(&book(), "food"),
            Err(EconError::NoMarketOffers {
                resource: Resource::Food,
                side: TradeSide::Sell
            })
        );
    }

    #[test]
    fn unknown_resource_is_rejected_before_fetching() {
        assert_eq!(
            market_info(&Offline, "credits"),
            Err(EconError::InvalidResource("credits".to_string()))
        );
    }

    #[test]
    fn source_failures_propagate() {
        assert_eq!(
            market_info(&Offline, "oil"),
            Err(EconError::Source(SourceError::Unavailable(
                "market closed".into()
            )))
        );
    }
}
