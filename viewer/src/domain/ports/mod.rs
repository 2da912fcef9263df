//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod feed_api;

pub use feed_api::{decode_result, RemoteFeedApi};
