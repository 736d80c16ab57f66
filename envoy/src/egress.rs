//! Egress traffic: per-port route configurations for permitted external
//! destinations, with explicit HTTP routing rules and retry policy.

use crate::routes::{
    build_route, egress_route_config_name, route_configuration_stub, sanitize_http_methods,
    virtual_host_stub, EGRESS_VIRTUAL_HOST_PREFIX,
};
use mesh_controller_core::egress::{EgressHttpRouteConfig, EgressHttpRoutingRule};
use std::collections::BTreeMap;
use tracing::warn;
use xds_api::pb::envoy::config::route::v3 as xds_route;

/// Builds one egress route configuration per port.
pub fn to_route_configurations(
    port_configs: &BTreeMap<u16, Vec<EgressHttpRouteConfig>>,
) -> Vec<xds_route::RouteConfiguration> {
    let mut route_configs = Vec::with_capacity(port_configs.len());
    for (port, configs) in port_configs {
        let mut config = route_configuration_stub(egress_route_config_name(*port));

        for egress_config in configs {
            let Some(host) = egress_config.hostnames.first() else {
                warn!(config = %egress_config.name, "egress config without hostnames");
                continue;
            };
            let mut virtual_host = virtual_host_stub(
                EGRESS_VIRTUAL_HOST_PREFIX,
                host,
                egress_config.hostnames.clone(),
            );
            virtual_host.routes = to_routes(&egress_config.routing_rules);
            config.virtual_hosts.push(virtual_host);
        }

        route_configs.push(config);
    }
    route_configs
}

/// Builds routes straight from each rule's declared match and retry policy.
/// No identity gating applies to external destinations.
fn to_routes(rules: &[EgressHttpRoutingRule]) -> Vec<xds_route::Route> {
    let mut routes = Vec::new();
    for rule in rules {
        let http_match = &rule.route.http_route_match;
        for method in sanitize_http_methods(&http_match.methods) {
            if let Some(route) = build_route(
                &http_match.path,
                &method,
                &http_match.headers,
                &rule.route.weighted_clusters,
                &rule.route.retry_policy,
            ) {
                routes.push(route);
            }
        }
    }
    routes
}
