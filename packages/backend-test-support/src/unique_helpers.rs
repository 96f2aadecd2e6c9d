//! Test helpers for generating unique test data
//!
//! This module provides utilities to help generate unique test data using ULIDs
//! to ensure test isolation and avoid conflicts between test runs.

use ulid::Ulid;

/// Generate a unique string with the given prefix, e.g. a document number.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let n1 = unique_str("doc");
/// let n2 = unique_str("doc");
/// assert_ne!(n1, n2);
/// assert!(n1.starts_with("doc-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address with the given prefix.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("admin");
/// let email2 = unique_email("admin");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}
