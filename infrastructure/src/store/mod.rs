//! Control-plane store adapters
//!
//! - [`InMemoryStore`]: a [`ResourceStore`](ark_application::ResourceStore)
//!   over manifests held in memory
//! - [`manifest`]: loading YAML/JSON manifest files into that store

pub mod manifest;
mod memory;

pub use manifest::{ManifestError, load_manifests};
pub use memory::InMemoryStore;
