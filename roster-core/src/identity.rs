//! Identifier helpers for employee records.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use uuid::Uuid;

/// Timestamp type using UTC timezone. Serialized as ISO-8601.
pub type Timestamp = DateTime<Utc>;

/// Canonical GUID textual shape: 8-4-4-4-12 hexadecimal groups.
static GUID_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("GUID pattern is valid")
});

/// Generate a new record identifier: a version-4 (random) UUID rendered in
/// the canonical hyphenated form.
pub fn new_person_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `value` matches the canonical GUID textual shape.
///
/// This is a shape check only; it says nothing about emptiness. Callers that
/// treat an empty identifier as "to be generated" must test for that first.
pub fn is_guid_shaped(value: &str) -> bool {
    GUID_SHAPE.is_match(value)
}

/// Derive a fresh employee number: `EMP-` + the last five digits of the
/// current epoch-millisecond clock + a four-digit random suffix.
pub fn new_employee_no() -> String {
    let suffix = rand::rng().random_range(1000..10000);
    employee_no_from_parts(Utc::now().timestamp_millis(), suffix)
}

/// Deterministic employee-number constructor. `suffix` is expected to be a
/// four-digit value; callers outside tests should go through
/// [`new_employee_no`].
pub fn employee_no_from_parts(epoch_millis: i64, suffix: u32) -> String {
    let millis = epoch_millis.unsigned_abs().to_string();
    let tail = &millis[millis.len().saturating_sub(5)..];
    format!("EMP-{tail}{suffix}")
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Generated identifiers always pass their own shape check.
        #[test]
        fn prop_generated_ids_are_guid_shaped(_i in 0..50u8) {
            prop_assert!(is_guid_shaped(&new_person_id()));
        }

        /// Employee numbers from realistic clocks are EMP- + 9 digits.
        #[test]
        fn prop_employee_no_shape(
            millis in 1_000_000_000_000i64..9_999_999_999_999i64,
            suffix in 1000u32..10000u32,
        ) {
            let no = employee_no_from_parts(millis, suffix);
            prop_assert!(no.starts_with("EMP-"));
            let digits = &no[4..];
            prop_assert_eq!(digits.len(), 9);
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
