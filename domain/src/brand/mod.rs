//! Brand projects, the subject of every scan.

pub mod entities;

pub use entities::{Project, ProjectId, UserId};
