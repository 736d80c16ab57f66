use mesh_controller_core::StatsHeaders;

/// Descriptor for a connected sidecar, carrying the workload metadata its
/// stats headers are derived from.
///
/// The descriptor is optional at the call sites: a proxy that has not
/// announced itself simply gets no stats headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proxy {
    pub pod_name: Option<String>,
    pub pod_namespace: Option<String>,
    pub workload_kind: Option<String>,
    pub workload_name: Option<String>,
}

const STATS_HEADER_POD: &str = "mesh-stats-pod";
const STATS_HEADER_NAMESPACE: &str = "mesh-stats-namespace";
const STATS_HEADER_KIND: &str = "mesh-stats-kind";
const STATS_HEADER_NAME: &str = "mesh-stats-name";

/// Value emitted when a workload attribute is not known.
const UNKNOWN: &str = "unknown";

// === impl Proxy ===

impl StatsHeaders for Proxy {
    /// The header set is fixed so the data plane's stats extension can rely
    /// on its presence; absent attributes are filled with a placeholder.
    fn stats_headers(&self) -> Vec<(String, String)> {
        let or_unknown =
            |field: &Option<String>| field.clone().unwrap_or_else(|| UNKNOWN.to_string());
        vec![
            (STATS_HEADER_POD.to_string(), or_unknown(&self.pod_name)),
            (
                STATS_HEADER_NAMESPACE.to_string(),
                or_unknown(&self.pod_namespace),
            ),
            (
                STATS_HEADER_KIND.to_string(),
                or_unknown(&self.workload_kind),
            ),
            (
                STATS_HEADER_NAME.to_string(),
                or_unknown(&self.workload_name),
            ),
        ]
    }
}
