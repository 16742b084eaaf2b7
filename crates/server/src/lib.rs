//! CRM server library.
//!
//! This crate provides the web routes, the console menu and the customer
//! store as a library, allowing them to be tested and reused.
//!
//! # Architecture
//!
//! - [`db`] - The customer record store (`PostgreSQL`, or in-memory for tests)
//! - [`routes`] - Axum handlers for the web interface
//! - [`console`] - The interactive text menu
//!
//! Both interfaces share one [`db::CustomerStore`] handle and nothing else.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
