use super::spot::SpotQuote;
use ec2_catalog_common::{CapacityType, Offering};
use std::collections::BTreeMap;

/// Spot offerings for every priced zone (zone-list order), then one on-demand
/// offering per zone at the region-wide price. Zero prices produce nothing.
pub fn build_offerings(
    zones: &[String],
    spot_prices: &BTreeMap<String, SpotQuote>,
    on_demand_price: Option<f64>,
) -> Vec<Offering> {
    let mut offerings = Vec::new();

    for zone in zones {
        if let Some(quote) = spot_prices.get(zone).filter(|q| q.price > 0.0) {
            offerings.push(Offering::new(CapacityType::Spot, zone, quote.price, quote.available));
        }
    }

    if let Some(price) = on_demand_price.filter(|p| *p > 0.0) {
        for zone in zones {
            offerings.push(Offering::new(CapacityType::OnDemand, zone, price, true));
        }
    }

    offerings
}
