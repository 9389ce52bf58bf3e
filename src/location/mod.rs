//! Region resolution for Taiwan place names in chat messages.
//!
//! Provides the gazetteer (built-in or loaded from JSON), input
//! normalization, the prioritized matcher stages, and the resolver that ties
//! them together.

pub mod builtin;
pub mod gazetteer;
pub mod matcher;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use gazetteer::{Gazetteer, GazetteerEntry, GazetteerFile};
pub use matcher::MatchStage;
pub use resolver::RegionResolver;
pub use types::{FailureKind, GazetteerError, MatchSource, ResolvedLocation};
