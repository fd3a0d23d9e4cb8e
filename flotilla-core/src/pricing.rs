//! Price lookup capability.
//!
//! Cost aggregation itself lives with the consumer; the core only defines
//! the lookup contract and a static in-memory table for tests and
//! single-process deployments.

use std::collections::HashMap;

/// Capability to resolve the hourly rate of one priced component.
pub trait PriceLookup: Send + Sync {
    /// Hourly rate for a component (e.g., an instance type) in a region,
    /// or `None` when the component is not priced.
    fn price_of(&self, provider: &str, region: &str, component: &str) -> Option<f64>;
}

/// A static price table keyed by (provider, region, component).
#[derive(Debug, Default)]
pub struct StaticPriceTable {
    prices: HashMap<(String, String, String), f64>,
}

impl StaticPriceTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a price entry.
    #[must_use]
    pub fn with_price(
        mut self,
        provider: impl Into<String>,
        region: impl Into<String>,
        component: impl Into<String>,
        hourly_rate: f64,
    ) -> Self {
        self.prices
            .insert((provider.into(), region.into(), component.into()), hourly_rate);
        self
    }
}

impl PriceLookup for StaticPriceTable {
    fn price_of(&self, provider: &str, region: &str, component: &str) -> Option<f64> {
        self.prices
            .get(&(
                provider.to_string(),
                region.to_string(),
                component.to_string(),
            ))
            .copied()
    }
}
