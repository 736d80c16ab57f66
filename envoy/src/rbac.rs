//! Per-route authorization for inbound mesh traffic.
//!
//! Inbound routes carry a typed per-filter configuration that lets the
//! sidecar's authorization filter decide access from the presented client
//! identity alone. The payload format is a contract with that filter, so the
//! route builders only depend on the [`AuthzConfigBuilder`] seam; [`HttpRbac`]
//! is the mesh's production implementation targeting Envoy's HTTP RBAC
//! filter.

pub mod pb;

use anyhow::{ensure, Result};
use mesh_controller_core::ServiceIdentity;
use prost::Message;
use std::collections::BTreeSet;
use xds_api::pb::google::protobuf;

/// Well-known name of the data plane's HTTP authorization filter; per-route
/// configuration is keyed by this name.
pub const HTTP_RBAC_FILTER_NAME: &str = "envoy.filters.http.rbac";

/// Name of the allow policy attached to each route.
const RBAC_PER_ROUTE_POLICY_NAME: &str = "rbac-for-route";

const RBAC_PER_ROUTE_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.http.rbac.v3.RBACPerRoute";

/// Builds the per-route typed filter configuration encoding a rule's allowed
/// caller identities.
pub trait AuthzConfigBuilder {
    /// Returns the opaque payload for `typed_per_filter_config`. Errors make
    /// the caller skip the rule rather than emit an ungated route.
    fn per_route_config(&self, allowed: &BTreeSet<ServiceIdentity>) -> Result<protobuf::Any>;
}

/// Encodes allowed identities as an `RBACPerRoute` message for Envoy's HTTP
/// RBAC filter: `ALLOW` action, one permissive permission, one principal per
/// identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpRbac;

// === impl HttpRbac ===

impl AuthzConfigBuilder for HttpRbac {
    fn per_route_config(&self, allowed: &BTreeSet<ServiceIdentity>) -> Result<protobuf::Any> {
        ensure!(
            !allowed.is_empty(),
            "rule allows no service identities; refusing to build an ungated route"
        );

        // The route match already scoped the request; the policy only has to
        // assert who the caller is.
        let policy = pb::config::Policy {
            permissions: vec![pb::config::Permission {
                rule: Some(pb::config::permission::Rule::Any(true)),
            }],
            principals: allowed.iter().map(to_principal).collect(),
        };

        let per_route = pb::filter::RbacPerRoute {
            rbac: Some(pb::filter::Rbac {
                rules: Some(pb::config::Rbac {
                    action: pb::config::rbac::Action::Allow as i32,
                    policies: [(RBAC_PER_ROUTE_POLICY_NAME.to_string(), policy)]
                        .into_iter()
                        .collect(),
                }),
            }),
        };

        Ok(protobuf::Any {
            type_url: RBAC_PER_ROUTE_TYPE_URL.to_string(),
            value: per_route.encode_to_vec(),
        })
    }
}

fn to_principal(identity: &ServiceIdentity) -> pb::config::Principal {
    let identifier = if identity.is_wildcard() {
        pb::config::principal::Identifier::Any(true)
    } else {
        pb::config::principal::Identifier::Authenticated(pb::config::principal::Authenticated {
            principal_name: Some(pb::matcher::StringMatcher {
                ignore_case: false,
                match_pattern: Some(pb::matcher::string_matcher::MatchPattern::Exact(
                    identity.to_string(),
                )),
            }),
        })
    };

    pb::config::Principal {
        identifier: Some(identifier),
    }
}
