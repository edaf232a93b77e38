//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`]: external text-generation providers
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod string;
