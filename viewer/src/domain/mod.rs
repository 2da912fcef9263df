//! Domain layer
//!
//! Contains pure models and the port the rest of the crate talks through.
//! - `entities`: Posts, accounts, tags and feed state
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
