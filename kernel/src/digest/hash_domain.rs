//! Typed domain separators for [`super::hash::canonical_hash`].
//!
//! Every hash in the workspace selects a domain here. Adding a domain is a
//! single line in the macro invocation; the enum, `as_bytes()`, `ALL` and
//! `Display` are generated from it.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Domain separator prefixed to the hashed bytes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw, null-terminated prefix bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domains in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical run report produced by the harness runner.
    RunReport => b"WAYPOINT::RUN_REPORT::V1\0",

    /// Ordered goal-test traversal recorded during a run.
    Traversal => b"WAYPOINT::TRAVERSAL::V1\0",

    /// Search policy snapshot bound into a report.
    SearchPolicy => b"WAYPOINT::SEARCH_POLICY::V1\0",

    /// World description (graph JSON, level text) bound into a report.
    WorldInput => b"WAYPOINT::WORLD_INPUT::V1\0",
}
