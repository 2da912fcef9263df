//! Blurt JSON-RPC adapter
//!
//! HTTP implementation of the `RemoteFeedApi` port.

mod client;

pub use client::JsonRpcClient;
