#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Value types describing merged, resolved mesh traffic policy.
//!
//! These are the inputs to the data-plane translators: per-port inbound and
//! outbound policies, ingress policies, and egress HTTP route configs. The
//! policy compiler owns population; everything here is an immutable snapshot.

pub mod egress;
mod identity;
pub mod inbound;
pub mod outbound;
pub mod routes;

pub use self::identity::ServiceIdentity;

use serde::{Deserialize, Serialize};

/// Feature gates controlling optional data-plane behavior.
///
/// Populated from the mesh configuration resource. Unrecognized fields are
/// ignored so a newer mesh config can be consumed by an older controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Attach workload stats headers to inbound responses so the data
    /// plane's WASM stats extension can tag its metrics.
    #[serde(rename = "enableWASMStats")]
    pub enable_wasm_stats: bool,
}

/// Source of the stats headers attached to inbound responses.
///
/// Implemented by the per-proxy descriptor; absent descriptor means no
/// headers.
pub trait StatsHeaders {
    /// Returns `(name, value)` pairs in emission order.
    fn stats_headers(&self) -> Vec<(String, String)>;
}
