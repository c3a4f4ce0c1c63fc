//! Azur Core - Shared types library.
//!
//! This crate provides common types used across all Azur backend components:
//! - `api` - JSON HTTP API (public content reads, admin content writes)
//! - `cli` - Command-line tools for migrations and provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`documents`] - Content document types with merge/validation logic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod documents;
pub mod types;

pub use types::*;
