//! Shared types for netviz.
//!
//! Everything here is plain data: the subnet and device models produced by
//! discovery, the geometry consumed by the graph view, the error types and the
//! configuration knobs. No module in this crate touches the network.

pub mod config;
pub mod error;
pub mod geometry;
pub mod network;
