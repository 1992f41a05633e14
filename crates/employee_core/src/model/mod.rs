//! Domain records for the employee directory.
//!
//! # Responsibility
//! - Define plain data holders shared by repository and callers.
//!
//! # Invariants
//! - Models carry no persistence behavior.

pub mod employee;
