//! Employee domain model.
//!
//! # Responsibility
//! - Define the record materialized from one `employees` row.
//! - Define the insert payload used before the store assigns an ID.
//!
//! # Invariants
//! - `id` is assigned by the store and never chosen by callers.
//! - No field-level validation happens here; constraints live in the schema.

use serde::{Deserialize, Serialize};

/// Store-assigned primary key of an employee row.
pub type EmployeeId = i64;

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Primary key assigned on insert.
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Employee fields without an identity, used for inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    /// Attaches a store-assigned ID, producing the persisted shape.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
        }
    }
}

impl Employee {
    /// Returns the identity-free fields of this record.
    pub fn details(&self) -> NewEmployee {
        NewEmployee {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }
}
