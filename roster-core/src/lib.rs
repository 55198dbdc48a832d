//! Roster Core - Employee domain types
//!
//! Data types and identifier helpers shared by every Roster crate. No I/O
//! lives here; the HTTP client and the view engine sit in `roster-ui`.

pub mod employee;
pub mod identity;

pub use employee::{Employee, Status};
pub use identity::{
    employee_no_from_parts, is_guid_shaped, new_employee_no, new_person_id, Timestamp,
};
