//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for domain records.
//! - Isolate SQL text and row mapping from callers.
//!
//! # Invariants
//! - Repository APIs distinguish semantic absence (`NotFound`) from store
//!   failures (`Db`).

pub mod employee_repo;
