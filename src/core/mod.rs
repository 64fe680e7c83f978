//! Shared building blocks: address checksums and the persisted/remote key registry.

pub mod address;
pub mod keys;

pub use address::Address;
