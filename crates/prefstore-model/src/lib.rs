//! Document model for prefstore.
//!
//! This crate provides the value tree a preference store holds in memory:
//! scalars, ordered lists, and nested maps. The model mirrors exactly what
//! a structured-document codec can represent and places no schema beyond
//! that.
//!
//! The two types:
//!
//! - **[`Value`]**: one node of the document: null, bool, integer, float,
//!   text, list, or map.
//! - **[`Map`]**: the string-keyed mapping used at every level of the tree,
//!   including the root. Keys are kept in sorted order, which is what gives
//!   the persisted form its deterministic key ordering.

pub mod map;
pub mod value;

pub use map::Map;
pub use value::Value;
