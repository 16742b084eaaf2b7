//! CRM Core - Shared customer types.
//!
//! This crate provides the types used by every CRM component:
//! - `server` - Web endpoints and the interactive console
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Both interfaces build their inputs through these types so
//! the same rules apply no matter where a customer comes from.
//!
//! # Modules
//!
//! - [`types`] - Customer entity, its identifier, and validated input shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
