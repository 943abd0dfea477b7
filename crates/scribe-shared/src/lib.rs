//! # Scribe Shared
//!
//! Request and response types for the post API.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
