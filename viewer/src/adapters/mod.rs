//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod rpc;

pub use rpc::JsonRpcClient;
