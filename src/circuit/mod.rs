//! Circuit graph representation and validation.
//!
//! This module turns the parsed block sequence into a [`Circuit`]: nodes and
//! elements in name-indexed arenas, element endpoints resolved to
//! [`NodeId`]s, and a per-node adjacency index.

mod config;
mod graph;
mod types;
mod validate;

pub use config::{BuildConfig, NamePolicy};
pub use graph::{Circuit, Element, Node};
pub use types::*;
