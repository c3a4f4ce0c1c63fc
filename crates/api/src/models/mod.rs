//! Domain types for the API.

pub mod identity;

pub use identity::AdminIdentity;
