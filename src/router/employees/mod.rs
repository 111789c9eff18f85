//! Employees-related HTTP API.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod set_password;
pub mod update;
pub mod vacations;
