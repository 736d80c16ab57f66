//! Inbound mesh traffic: per-port route configurations whose virtual hosts
//! are the locally-served services, with every route gated on the caller
//! identities its rule allows.

use crate::rbac::{AuthzConfigBuilder, HTTP_RBAC_FILTER_NAME};
use crate::routes::{
    build_route, inbound_route_config_name, route_configuration_stub, sanitize_http_methods,
    virtual_host_stub, INBOUND_VIRTUAL_HOST_PREFIX,
};
use mesh_controller_core::{
    inbound::{InboundTrafficPolicy, Rule},
    FeatureFlags, StatsHeaders,
};
use std::collections::BTreeMap;
use tracing::{trace, warn};
use xds_api::pb::envoy::config::core::v3 as xds_core;
use xds_api::pb::envoy::config::route::v3 as xds_route;

/// Builds one inbound route configuration per listener port.
///
/// Stats headers are attached to responses only when the feature flag is on
/// and a proxy descriptor is available.
pub fn to_route_configurations<A>(
    port_policies: &BTreeMap<u16, Vec<InboundTrafficPolicy>>,
    proxy: Option<&dyn StatsHeaders>,
    flags: &FeatureFlags,
    authz: &A,
) -> Vec<xds_route::RouteConfiguration>
where
    A: AuthzConfigBuilder,
{
    let mut route_configs = Vec::with_capacity(port_policies.len());
    for (port, policies) in port_policies {
        let mut config = route_configuration_stub(inbound_route_config_name(*port));

        for policy in policies {
            let Some(host) = policy.hostnames.first() else {
                warn!(policy = %policy.name, "inbound policy without hostnames");
                continue;
            };
            let mut virtual_host =
                virtual_host_stub(INBOUND_VIRTUAL_HOST_PREFIX, host, policy.hostnames.clone());
            virtual_host.routes = to_routes(&policy.rules, authz);
            config.virtual_hosts.push(virtual_host);
        }

        if flags.enable_wasm_stats {
            if let Some(proxy) = proxy {
                config.response_headers_to_add = stats_response_headers(proxy);
            }
        }

        route_configs.push(config);
    }
    route_configs
}

/// Expands rules into data-plane routes, one per sanitized method, each
/// carrying the per-route authorization config for its allowed identities.
///
/// A rule that authorizes nobody contributes nothing.
fn to_routes<A>(rules: &[Rule], authz: &A) -> Vec<xds_route::Route>
where
    A: AuthzConfigBuilder,
{
    let mut routes = Vec::new();
    for rule in rules {
        if rule.allowed_service_identities.is_empty() {
            trace!("rule allows no identities; omitting route");
            continue;
        }

        let typed_config = match authz.per_route_config(&rule.allowed_service_identities) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "failed to build per-route authorization config; omitting route");
                continue;
            }
        };

        let http_match = &rule.route.http_route_match;
        for method in sanitize_http_methods(&http_match.methods) {
            let Some(mut route) = build_route(
                &http_match.path,
                &method,
                &http_match.headers,
                &rule.route.weighted_clusters,
                &rule.route.retry_policy,
            ) else {
                continue;
            };
            route.typed_per_filter_config =
                [(HTTP_RBAC_FILTER_NAME.to_string(), typed_config.clone())]
                    .into_iter()
                    .collect();
            routes.push(route);
        }
    }
    routes
}

fn stats_response_headers(proxy: &dyn StatsHeaders) -> Vec<xds_core::HeaderValueOption> {
    proxy
        .stats_headers()
        .into_iter()
        .map(|(key, value)| xds_core::HeaderValueOption {
            header: Some(xds_core::HeaderValue {
                key,
                value,
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::rbac::HttpRbac;
    use crate::routes::test_util::*;
    use crate::Proxy;
    use maplit::{btreemap, btreeset};
    use mesh_controller_core::{
        routes::{HttpRouteMatch, PathMatch, RetryPolicy, RouteWeightedClusters, WeightedCluster},
        ServiceIdentity,
    };

    fn route_to(cluster_name: &str, path: &str, methods: &[&str]) -> RouteWeightedClusters {
        RouteWeightedClusters {
            http_route_match: HttpRouteMatch {
                path: PathMatch::Regex(path.to_string()),
                methods: methods.iter().map(|m| m.to_string()).collect(),
                headers: Default::default(),
            },
            weighted_clusters: vec![WeightedCluster {
                cluster_name: cluster_name.to_string(),
                weight: 100,
            }],
            retry_policy: RetryPolicy::default(),
        }
    }

    fn allow_any(route: RouteWeightedClusters) -> Rule {
        Rule {
            route,
            allowed_service_identities: btreeset![ServiceIdentity::wildcard()],
        }
    }

    fn bookstore_policies() -> BTreeMap<u16, Vec<InboundTrafficPolicy>> {
        btreemap! {
            80 => vec![
                InboundTrafficPolicy {
                    name: "bookstore-v1-default".to_string(),
                    hostnames: vec!["bookstore-v1.default.svc.cluster.local".to_string()],
                    rules: vec![
                        allow_any(route_to("default/bookstore-v1|80", "/buy", &["GET"])),
                        allow_any(route_to("default/bookstore-v1|80", "/sell", &["GET"])),
                    ],
                },
                InboundTrafficPolicy {
                    name: "bookstore-v2-default".to_string(),
                    hostnames: vec!["bookstore-v2.default.svc.cluster.local".to_string()],
                    rules: vec![allow_any(route_to("default/bookstore-v2|80", "/buy", &["GET"]))],
                },
            ],
        }
    }

    #[test]
    fn no_policies_yield_no_configs() {
        let configs =
            to_route_configurations(&BTreeMap::new(), None, &FeatureFlags::default(), &HttpRbac);
        assert!(configs.is_empty());
    }

    #[test]
    fn one_config_per_port_with_gated_routes() {
        let configs = to_route_configurations(
            &bookstore_policies(),
            None,
            &FeatureFlags::default(),
            &HttpRbac,
        );

        assert_eq!(configs.len(), 1);
        let config = &configs[0];
        assert_eq!(config.name, "rds-inbound.80");
        assert!(config.response_headers_to_add.is_empty());

        assert_eq!(config.virtual_hosts.len(), 2);
        assert_eq!(
            config.virtual_hosts[0].name,
            "inbound_virtual-host|bookstore-v1.default.svc.cluster.local"
        );
        assert_eq!(config.virtual_hosts[0].routes.len(), 2);
        assert_eq!(
            config.virtual_hosts[1].name,
            "inbound_virtual-host|bookstore-v2.default.svc.cluster.local"
        );
        assert_eq!(config.virtual_hosts[1].routes.len(), 1);

        for vh in &config.virtual_hosts {
            for route in &vh.routes {
                let any = &route.typed_per_filter_config[HTTP_RBAC_FILTER_NAME];
                assert!(!any.value.is_empty());
            }
        }
    }

    #[test]
    fn rule_without_identities_is_omitted() {
        let policies = btreemap! {
            80 => vec![InboundTrafficPolicy {
                name: "bookstore-v1-default".to_string(),
                hostnames: vec!["bookstore-v1.default.svc.cluster.local".to_string()],
                rules: vec![Rule {
                    route: route_to("default/bookstore-v1|80", "/hello", &["GET"]),
                    allowed_service_identities: Default::default(),
                }],
            }],
        };
        let configs =
            to_route_configurations(&policies, None, &FeatureFlags::default(), &HttpRbac);

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].virtual_hosts.len(), 1);
        assert!(configs[0].virtual_hosts[0].routes.is_empty());
    }

    #[test]
    fn policy_without_rules_still_emits_its_virtual_host() {
        let policies = btreemap! {
            80 => vec![InboundTrafficPolicy {
                name: "bookstore-v1-default".to_string(),
                hostnames: vec!["bookstore-v1.default.svc.cluster.local".to_string()],
                rules: vec![],
            }],
        };
        let configs =
            to_route_configurations(&policies, None, &FeatureFlags::default(), &HttpRbac);

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].virtual_hosts.len(), 1);
        assert!(configs[0].virtual_hosts[0].routes.is_empty());
    }

    #[test]
    fn one_route_per_method() {
        let rules = vec![allow_any(route_to(
            "default/bookstore-v1|80",
            "/hello",
            &["POST", "GET", "GET"],
        ))];
        let routes = to_routes(&rules, &HttpRbac);

        assert_eq!(routes.len(), 2);
        let methods: Vec<&str> = routes
            .iter()
            .map(|route| header_regex(&route.r#match.as_ref().expect("match").headers[0]))
            .collect();
        assert_eq!(methods, vec!["GET", "POST"]);
    }

    #[test]
    fn wildcard_method_collapses_to_one_route() {
        let rules = vec![allow_any(route_to(
            "default/bookstore-v1|80",
            "/hello",
            &["GET", "POST", "*"],
        ))];
        let routes = to_routes(&rules, &HttpRbac);

        assert_eq!(routes.len(), 1);
        let matchers = &routes[0].r#match.as_ref().expect("match").headers;
        assert_eq!(matchers[0].name, ":method");
        assert_eq!(header_regex(&matchers[0]), ".*");
    }

    #[test]
    fn single_cluster_round_trip() {
        let rules = vec![allow_any(route_to("default/testCluster|80|local", "/hello", &["GET"]))];
        let routes = to_routes(&rules, &HttpRbac);

        assert_eq!(routes.len(), 1);
        let wc = weighted_clusters(&routes[0]);
        assert_eq!(wc.clusters.len(), 1);
        assert_eq!(wc.clusters[0].name, "default/testCluster|80|local");
        assert_eq!(wc.clusters[0].weight.as_ref().expect("weight").value, 100);
        assert_eq!(wc.total_weight.as_ref().expect("total").value, 100);
    }

    #[test]
    fn stats_headers_follow_the_flag_and_descriptor() {
        let policies = bookstore_policies();
        let proxy = Proxy::default();
        let flags = FeatureFlags {
            enable_wasm_stats: true,
        };

        let configs = to_route_configurations(&policies, Some(&proxy), &flags, &HttpRbac);
        for config in &configs {
            assert_eq!(
                config.response_headers_to_add.len(),
                proxy.stats_headers().len()
            );
        }

        // Flag off: no headers even with a descriptor.
        let configs =
            to_route_configurations(&policies, Some(&proxy), &FeatureFlags::default(), &HttpRbac);
        for config in &configs {
            assert!(config.response_headers_to_add.is_empty());
        }

        // No descriptor: no headers even with the flag on.
        let configs = to_route_configurations(&policies, None, &flags, &HttpRbac);
        for config in &configs {
            assert!(config.response_headers_to_add.is_empty());
        }
    }

    #[test]
    fn equal_inputs_build_equal_outputs() {
        let policies = bookstore_policies();
        let first =
            to_route_configurations(&policies, None, &FeatureFlags::default(), &HttpRbac);
        let second =
            to_route_configurations(&policies, None, &FeatureFlags::default(), &HttpRbac);
        assert_eq!(first, second);
    }
}
