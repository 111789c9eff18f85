//! Vacations-related HTTP API.

pub mod approve;
pub mod delete;
pub mod pending;
pub mod reject;
pub mod submit;
