//! Region code to endpoint hostname resolution

use tracing::warn;

/// Static region-to-endpoint table, never modified after startup.
const REGION_ENDPOINTS: [(&str, &str); 6] = [
    ("EU", "s3-eu-west-1.amazonaws.com"),
    ("us-west-1", "s3-us-west-1.amazonaws.com"),
    ("us-west-2", "s3-us-west-2.amazonaws.com"),
    ("ap-southeast-1", "s3-ap-southeast-1.amazonaws.com"),
    ("ap-northeast-1", "s3-ap-northeast-1.amazonaws.com"),
    ("sa-east-1", "sa-east-1.amazonaws.com"),
];

/// Resolve a region identifier to an endpoint hostname.
///
/// Known region codes map to their endpoint. Any other string is used
/// verbatim as the endpoint, so regions newer than the table keep
/// working without a release.
pub fn resolve_endpoint(region: &str) -> &str {
    for (code, host) in REGION_ENDPOINTS.iter() {
        if *code == region {
            return host;
        }
    }
    warn!(
        "Region {} given but not found in the region to endpoint map. Will use it as an endpoint",
        region
    );
    region
}
