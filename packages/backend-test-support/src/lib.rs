//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, unique test-data generation, and Problem Details
//! response assertions.

pub mod problem_details;
pub mod test_logging;
pub mod unique_helpers;
