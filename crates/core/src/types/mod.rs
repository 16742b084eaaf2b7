//! Core types for the CRM.
//!
//! This module provides type-safe wrappers for the customer domain.

pub mod customer;
pub mod id;

pub use customer::{Customer, CustomerUpdate, NewCustomer, ValidationError};
pub use id::{CustomerId, CustomerIdError};
