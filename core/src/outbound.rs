use crate::routes::RouteWeightedClusters;

/// Traffic policy for a remote mesh service reachable from this proxy.
///
/// Outbound routes carry no caller gating; upstream selection already
/// happened at L4, so the routes here only describe the traffic split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundTrafficPolicy {
    pub name: String,
    pub hostnames: Vec<String>,
    pub routes: Vec<RouteWeightedClusters>,
}
