//! Ingress traffic: a single route configuration admitting non-mesh clients
//! to services that opted in.
//!
//! Structurally this mirrors the inbound build, but ingress routes carry no
//! per-route authorization config (external callers present no mesh
//! identity) and no stats headers.

use crate::routes::{
    build_route, route_configuration_stub, sanitize_http_methods, virtual_host_stub,
    INGRESS_ROUTE_CONFIG_NAME, INGRESS_VIRTUAL_HOST_PREFIX,
};
use mesh_controller_core::inbound::{InboundTrafficPolicy, Rule};
use tracing::{trace, warn};
use xds_api::pb::envoy::config::route::v3 as xds_route;

/// Builds the single ingress route configuration, or `None` when no ingress
/// policies exist.
pub fn to_route_configuration(
    policies: &[InboundTrafficPolicy],
) -> Option<xds_route::RouteConfiguration> {
    if policies.is_empty() {
        return None;
    }

    let mut config = route_configuration_stub(INGRESS_ROUTE_CONFIG_NAME.to_string());
    for policy in policies {
        let Some(host) = policy.hostnames.first() else {
            warn!(policy = %policy.name, "ingress policy without hostnames");
            continue;
        };
        let mut virtual_host =
            virtual_host_stub(INGRESS_VIRTUAL_HOST_PREFIX, host, policy.hostnames.clone());
        virtual_host.routes = to_routes(&policy.rules);
        config.virtual_hosts.push(virtual_host);
    }
    Some(config)
}

/// The inbound route transform minus identity gating: rules that authorize
/// nobody still emit nothing, but emitted routes carry no per-route filter
/// config.
fn to_routes(rules: &[Rule]) -> Vec<xds_route::Route> {
    let mut routes = Vec::new();
    for rule in rules {
        if rule.allowed_service_identities.is_empty() {
            trace!("rule allows no identities; omitting route");
            continue;
        }

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
