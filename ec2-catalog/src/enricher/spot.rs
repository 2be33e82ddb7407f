use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ec2_catalog_providers::inventory::{SpotPricePoint, SpotPriceQuery};
use ec2_catalog_providers::CatalogProvider;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotQuote {
    pub price: f64,
    pub available: bool,
}

/// Lowest price seen per zone. Any entry for a zone marks it available.
pub fn lowest_prices_by_zone(points: &[SpotPricePoint]) -> Result<BTreeMap<String, SpotQuote>> {
    let mut by_zone: BTreeMap<String, SpotQuote> = BTreeMap::new();

    for point in points {
        let Some(zone) = point.availability_zone.as_deref() else {
            continue;
        };
        let price = match point.spot_price.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid spot price '{}' in {}", raw, zone))?,
            None => 0.0,
        };

        let lower = by_zone.get(zone).map(|q| price < q.price).unwrap_or(true);
        if lower {
            by_zone.insert(
                zone.to_string(),
                SpotQuote {
                    price,
                    available: true,
                },
            );
        }
    }

    Ok(by_zone)
}

/// Current spot prices for `instance_type`. Failures degrade to an empty map.
pub async fn fetch_spot_prices(
    provider: &dyn CatalogProvider,
    region: &str,
    instance_type: &str,
    at: DateTime<Utc>,
) -> BTreeMap<String, SpotQuote> {
    let query = SpotPriceQuery::snapshot(instance_type, at);
    let prices = match provider.spot_price_history(region, &query).await {
        Ok(points) => lowest_prices_by_zone(&points),
        Err(e) => Err(e),
    };

    match prices {
        Ok(prices) => prices,
        Err(e) => {
            warn!("Error getting spot prices for {}: {:#}", instance_type, e);
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_minimum_per_zone() {
        let points = vec![
            SpotPricePoint::new("us-west-2a", "0.4200"),
            SpotPricePoint::new("us-west-2a", "0.3900"),
            SpotPricePoint::new("us-west-2a", "0.4100"),
            SpotPricePoint::new("us-west-2b", "0.5000"),
        ];
        let by_zone = lowest_prices_by_zone(&points).unwrap();
        assert_eq!(by_zone.len(), 2);
        assert_eq!(by_zone["us-west-2a"], SpotQuote { price: 0.39, available: true });
        assert_eq!(by_zone["us-west-2b"].price, 0.5);
    }

    #[test]
    fn skips_zoneless_entries_and_defaults_missing_price() {
        let mut zoneless = SpotPricePoint::new("us-west-2a", "0.1");
        zoneless.availability_zone = None;
        let mut unpriced = SpotPricePoint::new("us-west-2c", "0.1");
        unpriced.spot_price = None;

        let by_zone = lowest_prices_by_zone(&[zoneless, unpriced]).unwrap();
        assert_eq!(by_zone.len(), 1);
        assert_eq!(by_zone["us-west-2c"].price, 0.0);
    }

    #[test]
    fn unparsable_price_is_an_error() {
        assert!(lowest_prices_by_zone(&[SpotPricePoint::new("us-west-2a", "n/a")]).is_err());
    }
}
