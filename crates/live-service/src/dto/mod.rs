//! Data transfer objects
//!
//! Request DTOs (deserialized and validated), response DTOs (serialized),
//! and mappers between domain entities and responses.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
