//! Error handling for the document-expiry backend.

pub mod domain;

pub use domain::DomainError;
