//! Provider query value objects.
//!
//! [`QueryRequest`] is built once per orchestration run and shared read-only
//! by every provider task; [`RawResponse`] is what an adapter hands back
//! before any extraction happens.

pub mod request;
pub mod response;

pub use request::{QueryOptions, QueryRequest, ResponseFormat};
pub use response::RawResponse;
