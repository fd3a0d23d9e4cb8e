//! Hourly cost summarization over the price-lookup capability.

use flotilla_core::model::Universe;
use flotilla_core::pricing::PriceLookup;

/// Sum the hourly instance rates of a universe's nodes.
///
/// Components without a price contribute nothing; they are logged so an
/// operator can spot holes in the price table.
pub fn universe_hourly_cost(universe: &Universe, prices: &dyn PriceLookup) -> f64 {
    universe
        .details
        .nodes
        .iter()
        .filter_map(|node| {
            let rate = prices.price_of(&node.provider, &node.region, &node.instance_type);
            if rate.is_none() {
                tracing::warn!(
                    node = %node.name,
                    provider = %node.provider,
                    region = %node.region,
                    instance_type = %node.instance_type,
                    "no price for instance type"
                );
            }
            rate
        })
        .sum()
}
