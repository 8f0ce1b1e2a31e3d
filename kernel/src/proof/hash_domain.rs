//! Typed domain separators for canonical hashing.
//!
//! Adding a domain is a single change to the macro invocation below: the
//! enum, `as_bytes()`, `ALL` and `Display` are generated together.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Each variant maps to a unique, null-terminated prefix that is fed
        /// to SHA-256 ahead of the payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
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
    // Kernel

    /// Cavern graph projection.
    CavernGraph => b"CAVERN::GRAPH::V1\0",

    // Search

    /// Exploration event log.
    ExploreTrace => b"CAVERN::EXPLORE_TRACE::V1\0",

    /// Escape step log.
    EscapeTrace => b"CAVERN::ESCAPE_TRACE::V1\0",

    /// Search and escape policy projection.
    Policy => b"CAVERN::POLICY::V1\0",

    // Harness

    /// Episode report (binds every other digest).
    EpisodeReport => b"CAVERN::EPISODE_REPORT::V1\0",

    /// Individual artifact files in a report directory.
    ReportArtifact => b"CAVERN::REPORT_ARTIFACT::V1\0",
}
