//! PropertyHub Core - Shared domain types.
//!
//! This crate provides the types used across all PropertyHub components:
//! - `api` - HTTP listing service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Property identifiers, listing status and the `Property` record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
