//! Shared construction primitives for all route-configuration builders.

use mesh_controller_core::routes::{PathMatch, RetryPolicy, WeightedCluster};
use std::collections::{BTreeMap, BTreeSet};
use xds_api::pb::envoy::config::route::v3 as xds_route;
use xds_api::pb::envoy::r#type::matcher::v3 as xds_matcher;
use xds_api::pb::google::protobuf;

/// Pseudo-header carrying the request method.
pub(crate) const METHOD_HEADER: &str = ":method";

/// Pseudo-header carrying the request authority.
pub(crate) const AUTHORITY_HEADER: &str = ":authority";

/// Policy header key that targets the `:authority` pseudo-header.
pub(crate) const HOST_HEADER: &str = "host";

/// RE2 pattern matching any value.
pub const REGEX_MATCH_ALL: &str = ".*";

/// Method entry matching every HTTP verb.
pub const WILDCARD_HTTP_METHOD: &str = "*";

pub(crate) const INBOUND_VIRTUAL_HOST_PREFIX: &str = "inbound_virtual-host";
pub(crate) const OUTBOUND_VIRTUAL_HOST_PREFIX: &str = "outbound_virtual-host";
pub(crate) const INGRESS_VIRTUAL_HOST_PREFIX: &str = "ingress_virtual-host";
pub(crate) const EGRESS_VIRTUAL_HOST_PREFIX: &str = "egress_virtual-host";

/// Name of the single ingress route configuration.
pub const INGRESS_ROUTE_CONFIG_NAME: &str = "rds-ingress";

/// Name of the inbound route configuration served for a listener port.
pub fn inbound_route_config_name(port: u16) -> String {
    format!("rds-inbound.{port}")
}

/// Name of the outbound route configuration served for a listener port.
pub fn outbound_route_config_name(port: u16) -> String {
    format!("rds-outbound.{port}")
}

/// Name of the egress route configuration served for a port.
pub fn egress_route_config_name(port: u16) -> String {
    format!("rds-egress.{port}")
}

/// Creates a named route configuration with no virtual hosts.
///
/// Cluster validation is disabled so a route referencing a cluster the
/// sidecar has not yet accepted does not reject the whole configuration.
pub fn route_configuration_stub(name: String) -> xds_route::RouteConfiguration {
    xds_route::RouteConfiguration {
        name,
        validate_clusters: Some(protobuf::BoolValue { value: false }),
        ..Default::default()
    }
}

/// Creates a virtual host selected by `domains`, with no routes yet.
pub(crate) fn virtual_host_stub(
    prefix: &str,
    host: &str,
    domains: Vec<String>,
) -> xds_route::VirtualHost {
    xds_route::VirtualHost {
        name: format!("{prefix}|{host}"),
        domains,
        ..Default::default()
    }
}

/// Collapses duplicate HTTP methods and applies wildcard semantics: any `*`
/// entry makes the whole set a single wildcard.
///
/// An empty input yields an empty output; the caller must not emit a route
/// for it.
pub fn sanitize_http_methods(methods: &[String]) -> Vec<String> {
    if methods.iter().any(|m| m == WILDCARD_HTTP_METHOD) {
        return vec![WILDCARD_HTTP_METHOD.to_string()];
    }

    let unique: BTreeSet<&String> = methods.iter().collect();
    unique.into_iter().cloned().collect()
}

/// Builds the traffic-splitting block for a route.
///
/// Returns `None` when the total weight is zero, in which case the caller
/// must not emit the route. Entries are ordered by cluster name so equal
/// policy yields byte-equal output.
#[allow(deprecated)]
pub fn build_weighted_cluster(
    weighted_clusters: &[WeightedCluster],
) -> Option<xds_route::WeightedCluster> {
    let total: u32 = weighted_clusters.iter().map(|wc| wc.weight).sum();
    if total == 0 {
        return None;
    }

    // Cluster names are unique within a set, so name order is total.
    let mut sorted = weighted_clusters.to_vec();
    sorted.sort();

    let clusters = sorted
        .into_iter()
        .map(|wc| xds_route::weighted_cluster::ClusterWeight {
            name: wc.cluster_name,
            weight: Some(protobuf::UInt32Value { value: wc.weight }),
            ..Default::default()
        })
        .collect();

    Some(xds_route::WeightedCluster {
        clusters,
        total_weight: Some(protobuf::UInt32Value { value: total }),
        ..Default::default()
    })
}

/// Builds one data-plane route for a single, already-sanitized method.
///
/// Returns `None` when the weighted-cluster total is zero.
pub fn build_route(
    path: &PathMatch,
    method: &str,
    headers: &BTreeMap<String, String>,
    weighted_clusters: &[WeightedCluster],
    retry_policy: &RetryPolicy,
) -> Option<xds_route::Route> {
    let weighted_cluster = build_weighted_cluster(weighted_clusters)?;

    let path_specifier = match path {
        PathMatch::Exact(p) => xds_route::route_match::PathSpecifier::Path(p.clone()),
        PathMatch::Prefix(p) => xds_route::route_match::PathSpecifier::Prefix(p.clone()),
        PathMatch::Regex(p) => {
            xds_route::route_match::PathSpecifier::SafeRegex(safe_regex(p.clone()))
        }
    };

    Some(xds_route::Route {
        r#match: Some(xds_route::RouteMatch {
            path_specifier: Some(path_specifier),
            headers: headers_for_route(method, headers),
            ..Default::default()
        }),
        action: Some(xds_route::route::Action::Route(xds_route::RouteAction {
            cluster_specifier: Some(xds_route::route_action::ClusterSpecifier::WeightedClusters(
                weighted_cluster,
            )),
            timeout: Some(protobuf::Duration {
                seconds: 0,
                nanos: 0,
            }),
            retry_policy: Some(build_retry_policy(retry_policy)),
            ..Default::default()
        })),
        ..Default::default()
    })
}

/// Passes the retry policy through verbatim; the empty instance is valid.
pub fn build_retry_policy(retry_policy: &RetryPolicy) -> xds_route::RetryPolicy {
    xds_route::RetryPolicy {
        retry_on: retry_policy.retry_on.clone(),
        per_try_timeout: retry_policy.per_try_timeout.map(|timeout| {
            protobuf::Duration {
                seconds: timeout.as_secs() as i64,
                nanos: timeout.subsec_nanos() as i32,
            }
        }),
        num_retries: retry_policy
            .num_retries
            .map(|value| protobuf::UInt32Value { value }),
        ..Default::default()
    }
}

/// Builds the header matchers for one route: the `:method` matcher always
/// leads, followed by the user headers in ascending key order.
pub(crate) fn headers_for_route(
    method: &str,
    headers: &BTreeMap<String, String>,
) -> Vec<xds_route::HeaderMatcher> {
    let mut matchers = Vec::with_capacity(headers.len() + 1);
    matchers.push(header_matcher(METHOD_HEADER, regex_for_method(method)));
    for (name, pattern) in headers {
        let name = if name == HOST_HEADER {
            AUTHORITY_HEADER
        } else {
            name
        };
        matchers.push(header_matcher(name, pattern.clone()));
    }
    matchers
}

fn regex_for_method(method: &str) -> String {
    if method == WILDCARD_HTTP_METHOD {
        REGEX_MATCH_ALL.to_string()
    } else {
        method.to_string()
    }
}

#[allow(deprecated)]
fn header_matcher(name: &str, pattern: String) -> xds_route::HeaderMatcher {
    xds_route::HeaderMatcher {
        name: name.to_string(),
        header_match_specifier: Some(
            xds_route::header_matcher::HeaderMatchSpecifier::SafeRegexMatch(safe_regex(pattern)),
        ),
        ..Default::default()
    }
}

#[allow(deprecated)]
fn safe_regex(pattern: String) -> xds_matcher::RegexMatcher {
    xds_matcher::RegexMatcher {
        engine_type: Some(xds_matcher::regex_matcher::EngineType::GoogleRe2(
            xds_matcher::regex_matcher::GoogleRe2::default(),
        )),
        regex: pattern,
    }
}
