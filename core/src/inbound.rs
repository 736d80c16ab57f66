use crate::{routes::RouteWeightedClusters, ServiceIdentity};
use std::collections::BTreeSet;

/// Traffic policy for a locally-served mesh service.
///
/// `hostnames` is non-empty by construction in the policy compiler; the
/// first hostname doubles as the virtual-host discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundTrafficPolicy {
    pub name: String,
    pub hostnames: Vec<String>,
    pub rules: Vec<Rule>,
}

/// A single inbound rule: a route plus the caller identities permitted to
/// invoke it.
///
/// An empty identity set authorizes nobody; such rules yield no data-plane
/// route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub route: RouteWeightedClusters,
    pub allowed_service_identities: BTreeSet<ServiceIdentity>,
}
