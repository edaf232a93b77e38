//! Application-level configuration.
//!
//! - [`ScanParams`]: per-provider retry and generation options
//! - [`JobParams`]: outer job retry and queue sizing

pub mod job_params;
pub mod scan_params;

pub use job_params::JobParams;
pub use scan_params::ScanParams;
