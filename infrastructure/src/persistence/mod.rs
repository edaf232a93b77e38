//! Persistence adapters for the scan ports.

mod jsonl;
mod memory;

pub use jsonl::JsonlScanRepository;
pub use memory::{InMemoryProjectStore, InMemoryScanRepository};

/// Fresh identifier for a persisted scan
fn new_scan_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
