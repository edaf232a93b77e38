//! Background scan execution.

mod worker;

pub use worker::ScanJobWorker;
