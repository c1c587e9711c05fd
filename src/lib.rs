//! aerospike-cluster-info library
//!
//! Models Aerospike cluster topology (nodes, namespaces, sets, UDF packages)
//! from raw info-protocol replies. Per-node set and namespace statistics are
//! merged into cluster-wide records.

pub mod cluster;
pub mod config;
pub mod dump_loader;
pub mod info;
pub mod report;
pub mod utils;
