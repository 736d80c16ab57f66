use crate::routes::RouteWeightedClusters;

/// HTTP routing configuration for a permitted external destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EgressHttpRouteConfig {
    pub name: String,
    pub hostnames: Vec<String>,
    pub routing_rules: Vec<EgressHttpRoutingRule>,
}

/// A single egress routing rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EgressHttpRoutingRule {
    pub route: RouteWeightedClusters,
}
