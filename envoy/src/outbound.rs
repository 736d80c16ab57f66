//! Outbound mesh traffic: per-port route configurations whose virtual hosts
//! are the remote services this proxy may call.
//!
//! Matches are wildcard by design. The listener's filter chain already
//! selected the upstream service at L4, so every request reaching a virtual
//! host takes its traffic split.

use crate::routes::{
    build_route, outbound_route_config_name, route_configuration_stub, virtual_host_stub,
    OUTBOUND_VIRTUAL_HOST_PREFIX, WILDCARD_HTTP_METHOD,
};
use mesh_controller_core::{
    outbound::OutboundTrafficPolicy,
    routes::{HttpRouteMatch, RouteWeightedClusters},
};
use std::collections::BTreeMap;
use tracing::warn;
use xds_api::pb::envoy::config::route::v3 as xds_route;

/// Builds one outbound route configuration per listener port.
pub fn to_route_configurations(
    port_policies: &BTreeMap<u16, Vec<OutboundTrafficPolicy>>,
) -> Vec<xds_route::RouteConfiguration> {
    let mut route_configs = Vec::with_capacity(port_policies.len());
    for (port, policies) in port_policies {
        let mut config = route_configuration_stub(outbound_route_config_name(*port));

        for policy in policies {
            let Some(host) = policy.hostnames.first() else {
                warn!(policy = %policy.name, "outbound policy without hostnames");
                continue;
            };
            let mut virtual_host =
                virtual_host_stub(OUTBOUND_VIRTUAL_HOST_PREFIX, host, policy.hostnames.clone());
            virtual_host.routes = to_routes(&policy.routes);
            config.virtual_hosts.push(virtual_host);
        }

        route_configs.push(config);
    }
    route_configs
}

/// Builds wildcard routes: any path, any method, no user headers.
fn to_routes(routes: &[RouteWeightedClusters]) -> Vec<xds_route::Route> {
    let wildcard = HttpRouteMatch::wildcard();
    routes
        .iter()
        .filter_map(|route| {
            build_route(
                &wildcard.path,
                WILDCARD_HTTP_METHOD,
                &wildcard.headers,
                &route.weighted_clusters,
                &route.retry_policy,
            )
        })
        .collect()
}
