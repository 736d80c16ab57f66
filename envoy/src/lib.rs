#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Translates mesh traffic policy into the Envoy xDS v3 `RouteConfiguration`
//! messages served over RDS.
//!
//! There is one builder per traffic direction ([`inbound`], [`outbound`],
//! [`ingress`], [`egress`]), each a pure function over the policy snapshot.
//! The xDS server wraps the results in a discovery response; no state is
//! retained here.

pub mod egress;
pub mod inbound;
pub mod ingress;
pub mod outbound;
mod proxy;
pub mod rbac;
pub mod routes;

pub use self::proxy::Proxy;
