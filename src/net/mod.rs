//! Identity-provider boundary modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the identity DTOs, `error` the failure taxonomy,
//! `backend` the capability contract the auth store consumes, and `http`
//! the gloo-net implementation against the identity endpoints.

pub mod backend;
pub mod error;
pub mod http;
pub mod types;
