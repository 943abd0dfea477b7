//! # Scribe Core
//!
//! The domain layer of the Scribe post service.
//! This crate contains the post lifecycle rules with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod manager;
pub mod ports;

pub use error::DomainError;
pub use manager::{AccessPolicy, ManagerConfig, PostManager, parse_post_id};
