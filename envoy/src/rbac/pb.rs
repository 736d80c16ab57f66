//! Hand-maintained subset of the Envoy RBAC filter protobufs.
//!
//! Field numbers must stay in lockstep with `envoy/config/rbac/v3/rbac.proto`,
//! `envoy/extensions/filters/http/rbac/v3/rbac.proto`, and
//! `envoy/type/matcher/v3/string.proto`: the sidecar decodes these messages
//! from the per-route `Any` payload.

/// Subset of `envoy.type.matcher.v3`.
pub mod matcher {
    /// Specifies the way to match a string.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct StringMatcher {
        /// If true, indicates the exact/prefix/suffix/contains matching
        /// should be case insensitive.
        #[prost(bool, tag = "6")]
        pub ignore_case: bool,
        #[prost(oneof = "string_matcher::MatchPattern", tags = "1, 2, 3, 7")]
        pub match_pattern: ::core::option::Option<string_matcher::MatchPattern>,
    }
    /// Nested message and enum types in `StringMatcher`.
    pub mod string_matcher {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum MatchPattern {
            /// The input string must match exactly the string specified here.
            #[prost(string, tag = "1")]
            Exact(::prost::alloc::string::String),
            /// The input string must have the prefix specified here.
            #[prost(string, tag = "2")]
            Prefix(::prost::alloc::string::String),
            /// The input string must have the suffix specified here.
            #[prost(string, tag = "3")]
            Suffix(::prost::alloc::string::String),
            /// The input string must have the substring specified here.
            #[prost(string, tag = "7")]
            Contains(::prost::alloc::string::String),
        }
    }
}

/// Subset of `envoy.config.rbac.v3`.
pub mod config {
    /// Role Based Access Control policy set checked against the incoming
    /// request.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Rbac {
        /// The action to take if a policy matches.
        #[prost(enumeration = "rbac::Action", tag = "1")]
        pub action: i32,
        /// Maps from policy name to policy.
        #[prost(map = "string, message", tag = "2")]
        pub policies: ::std::collections::HashMap<::prost::alloc::string::String, Policy>,
    }
    /// Nested message and enum types in `RBAC`.
    pub mod rbac {
        /// Should we do safelist or blocklist style access control?
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum Action {
            /// The policies grant access to principals.
            Allow = 0,
            /// The policies deny access to principals.
            Deny = 1,
            /// The policies set the `access_log_hint` dynamic metadata.
            Log = 2,
        }
    }

    /// Policy specifies a role and the principals that are assigned/denied
    /// the role.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Policy {
        /// Required. The set of permissions that define a role.
        #[prost(message, repeated, tag = "1")]
        pub permissions: ::prost::alloc::vec::Vec<Permission>,
        /// Required. The set of principals that are assigned/denied the role
        /// based on "action".
        #[prost(message, repeated, tag = "2")]
        pub principals: ::prost::alloc::vec::Vec<Principal>,
    }

    /// Permission defines an action (or actions) that a principal can take.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Permission {
        #[prost(oneof = "permission::Rule", tags = "3")]
        pub rule: ::core::option::Option<permission::Rule>,
    }
    /// Nested message and enum types in `Permission`.
    pub mod permission {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Rule {
            /// When any is set, it matches any action.
            #[prost(bool, tag = "3")]
            Any(bool),
        }
    }

    /// Principal defines an identity or a group of identities for a
    /// downstream subject.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Principal {
        #[prost(oneof = "principal::Identifier", tags = "3, 4")]
        pub identifier: ::core::option::Option<principal::Identifier>,
    }
    /// Nested message and enum types in `Principal`.
    pub mod principal {
        /// Authentication attributes for a downstream.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Authenticated {
            /// The name of the principal.
            #[prost(message, optional, tag = "2")]
            pub principal_name: ::core::option::Option<super::super::matcher::StringMatcher>,
        }
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Identifier {
            /// When any is set, it matches any downstream.
            #[prost(bool, tag = "3")]
            Any(bool),
            /// Authenticated attributes that identify the downstream.
            #[prost(message, tag = "4")]
            Authenticated(Authenticated),
        }
    }
}

/// Subset of `envoy.extensions.filters.http.rbac.v3`.
pub mod filter {
    /// RBAC filter config.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Rbac {
        /// Specify the RBAC rules to be applied globally.
        #[prost(message, optional, tag = "1")]
        pub rules: ::core::option::Option<super::config::Rbac>,
    }

    /// Per-route specific configuration, overriding any global rules.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RbacPerRoute {
        /// Override the global configuration of the filter with this new
        /// config. If absent, the global RBAC policy will be disabled for
        /// this route.
        #[prost(message, optional, tag = "1")]
        pub rbac: ::core::option::Option<Rbac>,
    }
}
