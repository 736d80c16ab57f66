use std::{collections::BTreeMap, time::Duration};

/// An HTTP request path matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathMatch {
    /// The path must equal the given string.
    Exact(String),

    /// The path must begin with the given string.
    Prefix(String),

    /// An RE2 pattern applied to the whole path.
    Regex(String),
}

/// Matching criteria for an HTTP route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRouteMatch {
    pub path: PathMatch,

    /// HTTP verbs this route applies to. `*` matches every verb and
    /// subsumes any other entries.
    pub methods: Vec<String>,

    /// Header name to RE2 value pattern. The `host` key targets the
    /// `:authority` pseudo-header.
    pub headers: BTreeMap<String, String>,
}

/// A traffic-splitting target: an upstream cluster and its share of the
/// total weight.
///
/// Ordered by cluster name first so that sorting a set of clusters yields
/// the emission order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightedCluster {
    pub cluster_name: String,
    pub weight: u32,
}

/// Retry behavior passed through to the data plane verbatim.
///
/// The empty instance is valid and means "retry policy present, nothing
/// configured".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_on: String,
    pub per_try_timeout: Option<Duration>,
    pub num_retries: Option<u32>,
}

/// A route match paired with its traffic split and retry behavior; the
/// route payload shared by every traffic direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteWeightedClusters {
    pub http_route_match: HttpRouteMatch,
    pub weighted_clusters: Vec<WeightedCluster>,
    pub retry_policy: RetryPolicy,
}

// === impl HttpRouteMatch ===

impl HttpRouteMatch {
    /// The match used when upstream selection already happened at L4: any
    /// path, any method, no header constraints.
    pub fn wildcard() -> Self {
        Self {
            path: PathMatch::Regex(".*".to_string()),
            methods: vec!["*".to_string()],
            headers: BTreeMap::new(),
        }
    }
}
