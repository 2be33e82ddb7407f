use ec2_catalog_providers::inventory::OnDemandQuery;
use ec2_catalog_providers::CatalogProvider;
use serde_json::Value;
use tracing::{debug, warn};

/// Location name the pricing API expects for a region code. Unknown codes are
/// passed through unchanged, which simply matches no product.
pub fn region_display_name(region: &str) -> &str {
    match region {
        "us-east-1" => "US East (N. Virginia)",
        "us-east-2" => "US East (Ohio)",
        "us-west-1" => "US West (N. California)",
        "us-west-2" => "US West (Oregon)",
        "eu-west-1" => "EU (Ireland)",
        "eu-central-1" => "EU (Frankfurt)",
        "ap-northeast-1" => "Asia Pacific (Tokyo)",
        "ap-southeast-1" => "Asia Pacific (Singapore)",
        "ap-southeast-2" => "Asia Pacific (Sydney)",
        "ap-south-1" => "Asia Pacific (Mumbai)",
        "eu-west-2" => "EU (London)",
        "eu-west-3" => "EU (Paris)",
        "eu-north-1" => "EU (Stockholm)",
        "sa-east-1" => "South America (Sao Paulo)",
        "ca-central-1" => "Canada (Central)",
        "ap-east-1" => "Asia Pacific (Hong Kong)",
        "me-south-1" => "Middle East (Bahrain)",
        "af-south-1" => "Africa (Cape Town)",
        "eu-south-1" => "EU (Milan)",
        other => other,
    }
}

fn first_dimension_price(doc: &Value) -> Option<Option<f64>> {
    let terms = doc.get("terms")?.get("OnDemand")?.as_object()?;
    for term in terms.values() {
        let Some(dimensions) = term.get("priceDimensions").and_then(|d| d.as_object()) else {
            continue;
        };
        if let Some(dimension) = dimensions.values().next() {
            let price = match dimension.get("pricePerUnit").and_then(|p| p.get("USD")) {
                None => Some(0.0),
                Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                Some(Value::Number(n)) => n.as_f64(),
                Some(_) => None,
            };
            return Some(price);
        }
    }
    None
}

/// USD unit price of the first price dimension found, scanning products and
/// terms in document order. Entries that are not valid JSON are skipped.
pub fn first_on_demand_price(price_list: &[String]) -> Option<f64> {
    for entry in price_list {
        let doc: Value = match serde_json::from_str(entry) {
            Ok(doc) => doc,
            Err(e) => {
                debug!("Skipping unparsable price list entry: {}", e);
                continue;
            }
        };
        if let Some(price) = first_dimension_price(&doc) {
            return price;
        }
    }
    None
}

pub async fn fetch_on_demand_price(provider: &dyn CatalogProvider, region: &str, instance_type: &str) -> Option<f64> {
    let query = OnDemandQuery::linux_shared(instance_type, region_display_name(region));
    match provider.on_demand_products(&query).await {
        Ok(price_list) => first_on_demand_price(&price_list),
        Err(e) => {
            warn!("Error getting on-demand pricing for {}: {:#}", instance_type, e);
            None
        }
    }
}
