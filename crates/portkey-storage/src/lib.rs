//! Storage backends for the Portkey URL shortener.

pub mod memory;

pub use memory::InMemoryLinkStore;
